use tareas_shared::{
  TaskId,
  TaskRow,
  TaskStatus
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub row:       TaskRow,
  pub on_select: Callback<TaskId>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.row.id;
  let on_select =
    props.on_select.clone();

  let dot_class = match props.row.status
  {
    | TaskStatus::NotStarted => {
      "dot pending"
    }
    | TaskStatus::InProgress => {
      "dot waiting"
    }
    | TaskStatus::Done => "dot done"
  };

  let due = props
    .row
    .due
    .map(|date| {
      date.format("%Y-%m-%d").to_string()
    })
    .unwrap_or_default();

  html! {
      <div class="row" onclick={move |_| on_select.emit(id)}>
          <div class={dot_class}></div>
          <div>
              <div>{ &props.row.description }</div>
              {
                  if due.is_empty() {
                      html! {}
                  } else {
                      html! { <div class="task-subtitle">{ format!("Due: {due}") }</div> }
                  }
              }
              <div class="task-subtitle category">
                  { format!("Category: {}", props.row.category) }
              </div>
          </div>
      </div>
  }
}
