use tareas_shared::{
  TaskId,
  TaskRow
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub rows:          Vec<TaskRow>,
  pub empty_message: String,
  pub on_select:     Callback<TaskId>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.rows.is_empty() {
    return html! {
        <div class="panel list">
            <p class="empty">{ &props.empty_message }</p>
        </div>
    };
  }

  html! {
      <div class="panel list">
          {
              for props.rows.iter().cloned().map(|row| html! {
                  <TaskListRow
                      row={row}
                      on_select={props.on_select.clone()}
                  />
              })
          }
      </div>
  }
}
