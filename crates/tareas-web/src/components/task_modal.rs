use tareas_shared::{
  Category,
  CategoryId,
  TaskForm,
  TaskId,
  TaskStatus
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Event,
  Html,
  InputEvent,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

/// Add/edit dialog contents. `editing` is `None` for a new task.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskModalState {
  pub editing: Option<TaskId>,
  pub form:    TaskForm,
  pub error:   Option<String>,
  pub busy:    bool
}

impl TaskModalState {
  pub fn create() -> Self {
    Self::default()
  }

  pub fn edit(
    id: TaskId,
    form: TaskForm
  ) -> Self {
    Self {
      editing: Some(id),
      form,
      ..Self::default()
    }
  }

  pub fn failed(
    self,
    message: String
  ) -> Self {
    Self {
      error: Some(message),
      busy: false,
      ..self
    }
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  pub state:      TaskModalState,
  pub categories: Vec<Category>,
  pub on_change:  Callback<TaskForm>,
  pub on_close:   Callback<MouseEvent>,
  pub on_submit:  Callback<MouseEvent>,
  pub on_delete:  Callback<MouseEvent>
}

#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  let form = props.state.form.clone();

  let on_description = {
    let form = form.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_change.emit(TaskForm {
          description: input.value(),
          ..form.clone()
        });
      }
    )
  };

  let on_due = {
    let form = form.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_change.emit(TaskForm {
          due_date: input.value(),
          ..form.clone()
        });
      }
    )
  };

  let on_status = {
    let form = form.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      if let Ok(status) = select
        .value()
        .parse::<TaskStatus>()
      {
        on_change.emit(TaskForm {
          status,
          ..form.clone()
        });
      }
    })
  };

  let on_category = {
    let form = form.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      let category = select
        .value()
        .parse::<CategoryId>()
        .ok();
      on_change.emit(TaskForm {
        category,
        ..form.clone()
      });
    })
  };

  let editing =
    props.state.editing.is_some();
  let title = if editing {
    "Edit Task"
  } else {
    "New Task"
  };

  html! {
      <div class="modal-backdrop" onclick={props.on_close.clone()}>
          <div class="modal" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
              <div class="header">{ title }</div>
              <div class="content">
                  <div class="field">
                      <label>{ "Description" }</label>
                      <input value={form.description.clone()} oninput={on_description} />
                  </div>
                  <div class="field">
                      <label>{ "Due date" }</label>
                      <input type="date" value={form.due_date.clone()} oninput={on_due} />
                  </div>
                  <div class="field">
                      <label>{ "Status" }</label>
                      <select onchange={on_status}>
                          {
                              for TaskStatus::ALL.iter().copied().map(|status| html! {
                                  <option value={status.key()} selected={form.status == status}>
                                      { status.label() }
                                  </option>
                              })
                          }
                      </select>
                  </div>
                  <div class="field">
                      <label>{ "Category" }</label>
                      <select onchange={on_category}>
                          <option value="" selected={form.category.is_none()}>
                              { "Select a category" }
                          </option>
                          {
                              for props.categories.iter().map(|category| html! {
                                  <option
                                      value={category.id.to_string()}
                                      selected={form.category == Some(category.id)}
                                  >
                                      { &category.name }
                                  </option>
                              })
                          }
                      </select>
                  </div>
                  {
                      match &props.state.error {
                          Some(message) => html! { <div class="error">{ message }</div> },
                          None => html! {},
                      }
                  }
                  <div class="footer">
                      {
                          if editing {
                              html! {
                                  <button
                                      type="button"
                                      class="btn danger"
                                      onclick={props.on_delete.clone()}
                                      disabled={props.state.busy}
                                  >
                                      { "Delete" }
                                  </button>
                              }
                          } else {
                              html! {}
                          }
                      }
                      <button type="button" class="btn" onclick={props.on_close.clone()}>{ "Cancel" }</button>
                      <button
                          type="button"
                          class="btn"
                          onclick={props.on_submit.clone()}
                          disabled={props.state.busy}
                      >
                          { if editing { "Save" } else { "Create" } }
                      </button>
                  </div>
              </div>
          </div>
      </div>
  }
}
