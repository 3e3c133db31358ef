use chrono::Local;
use tareas_shared::snapshot::empty_board_message;
use tareas_shared::{
  CategoryFilter,
  ClientError,
  Snapshot,
  StatusFilter,
  Task,
  TaskFilter,
  TaskForm,
  TaskId
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  UseStateHandle,
  function_component,
  html,
  use_effect_with,
  use_state
};
use yew_router::prelude::{
  Navigator,
  use_navigator
};

use crate::app::{
  Route,
  client,
  confirm
};
use crate::components::{
  FilterBar,
  NavBar,
  TaskList,
  TaskModal,
  TaskModalState
};

/// Board reads and refetches that fail end the session.
fn handle_lost_session(
  err: &ClientError,
  navigator: &Option<Navigator>
) -> bool {
  if !err.is_session_lost() {
    return false;
  }
  tracing::warn!(error = %err, "session lost; back to login");
  client().logout();
  if let Some(navigator) = navigator {
    navigator.push(&Route::Login);
  }
  true
}

fn store_tasks(
  snapshot: &UseStateHandle<Snapshot>,
  tasks: Vec<Task>
) {
  let mut next = (**snapshot).clone();
  next.replace_tasks(tasks);
  snapshot.set(next);
}

#[function_component(TasksPage)]
pub fn tasks_page() -> Html {
  let snapshot =
    use_state(Snapshot::default);
  let filter =
    use_state(TaskFilter::default);
  let modal = use_state(
    || None::<TaskModalState>
  );
  let board_error =
    use_state(|| None::<String>);
  let navigator = use_navigator();
  let user_name = client()
    .require_session()
    .map(|session| session.user_name)
    .unwrap_or_default();

  {
    let snapshot = snapshot.clone();
    let board_error =
      board_error.clone();
    let navigator = navigator.clone();

    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          match client().load_board().await
          {
            | Ok(loaded) => {
              tracing::info!(
                tasks = loaded.tasks().len(),
                categories =
                  loaded.categories().len(),
                "task board loaded"
              );
              snapshot.set(loaded);
            }
            | Err(err) => {
              if !handle_lost_session(
                &err, &navigator
              ) {
                board_error.set(Some(
                  err.to_string()
                ));
              }
            }
          }
        }
      );

      || ()
    });
  }

  let on_status = {
    let filter = filter.clone();
    Callback::from(
      move |status: StatusFilter| {
        filter.set(
          filter.with_status(status)
        )
      }
    )
  };

  let on_category = {
    let filter = filter.clone();
    Callback::from(
      move |category: CategoryFilter| {
        filter.set(
          filter.with_category(category)
        )
      }
    )
  };

  let on_add_click = {
    let modal = modal.clone();
    Callback::from(
      move |_: MouseEvent| {
        modal.set(Some(
          TaskModalState::create()
        ))
      }
    )
  };

  let on_select = {
    let modal = modal.clone();
    let snapshot = snapshot.clone();
    Callback::from(move |id: TaskId| {
      match snapshot.task(id) {
        | Some(task) => {
          modal.set(Some(
            TaskModalState::edit(
              id,
              TaskForm::from_task(task)
            )
          ))
        }
        | None => {
          tracing::warn!(%id, "selected task is not in the snapshot")
        }
      }
    })
  };

  let on_change = {
    let modal = modal.clone();
    Callback::from(
      move |form: TaskForm| {
        if let Some(state) =
          (*modal).clone()
        {
          modal.set(Some(
            TaskModalState {
              form,
              ..state
            }
          ));
        }
      }
    )
  };

  let on_close = {
    let modal = modal.clone();
    Callback::from(
      move |_: MouseEvent| {
        modal.set(None)
      }
    )
  };

  let on_submit = {
    let modal = modal.clone();
    let snapshot = snapshot.clone();
    let navigator = navigator.clone();
    Callback::from(
      move |_: MouseEvent| {
        let Some(state) =
          (*modal).clone()
        else {
          return;
        };
        if state.busy {
          return;
        }
        modal.set(Some(
          TaskModalState {
            busy: true,
            error: None,
            ..state.clone()
          }
        ));

        let modal = modal.clone();
        let snapshot = snapshot.clone();
        let navigator = navigator.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            let web = client();
            let result = match state.editing
            {
              | Some(id) => {
                web
                  .update_task(
                    id,
                    &state.form
                  )
                  .await
              }
              | None => {
                web
                  .create_task(&state.form)
                  .await
              }
            };

            match result {
              | Ok(tasks) => {
                store_tasks(
                  &snapshot, tasks
                );
                modal.set(None);
              }
              | Err(err) => {
                if !handle_lost_session(
                  &err, &navigator
                ) {
                  modal.set(Some(
                    state.failed(
                      err.to_string()
                    )
                  ));
                }
              }
            }
          }
        );
      }
    )
  };

  let on_delete = {
    let modal = modal.clone();
    let snapshot = snapshot.clone();
    let navigator = navigator.clone();
    Callback::from(
      move |_: MouseEvent| {
        let Some(state) =
          (*modal).clone()
        else {
          return;
        };
        let Some(id) = state.editing
        else {
          return;
        };

        let modal = modal.clone();
        let snapshot = snapshot.clone();
        let navigator = navigator.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            match client()
              .delete_task(id, || {
                confirm(
                  "Delete this task?"
                )
              })
              .await
            {
              | Ok(Some(tasks)) => {
                store_tasks(
                  &snapshot, tasks
                );
                modal.set(None);
              }
              | Ok(None) => {
                tracing::info!(%id, "task deletion canceled")
              }
              | Err(err) => {
                if !handle_lost_session(
                  &err, &navigator
                ) {
                  modal.set(Some(
                    state.failed(
                      err.to_string()
                    )
                  ));
                }
              }
            }
          }
        );
      }
    )
  };

  let on_logout = {
    let navigator = navigator.clone();
    Callback::from(
      move |_: MouseEvent| {
        client().logout();
        if let Some(navigator) =
          &navigator
        {
          navigator.push(&Route::Login);
        }
      }
    )
  };

  let today = Local::now().date_naive();
  let rows =
    snapshot.visible(&filter, today);
  let categories =
    snapshot.categories().to_vec();

  html! {
      <div class="page">
          <NavBar user_name={user_name} on_logout={on_logout} />
          <div class="toolbar">
              <FilterBar
                  filter={*filter}
                  categories={categories.clone()}
                  on_status={on_status}
                  on_category={on_category}
              />
              <button type="button" class="btn" onclick={on_add_click}>{ "Add task" }</button>
          </div>
          {
              match &*board_error {
                  Some(message) => html! { <div class="error">{ message }</div> },
                  None => html! {
                      <TaskList
                          rows={rows}
                          empty_message={empty_board_message(&filter)}
                          on_select={on_select}
                      />
                  },
              }
          }
          {
              match &*modal {
                  Some(state) => html! {
                      <TaskModal
                          state={state.clone()}
                          categories={categories}
                          on_change={on_change}
                          on_close={on_close}
                          on_submit={on_submit}
                          on_delete={on_delete}
                      />
                  },
                  None => html! {},
              }
          }
      </div>
  }
}
