use tareas_shared::{
  CategoryForm,
  CategoryId
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

use super::TextField;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryModalState {
  pub editing: Option<CategoryId>,
  pub form:    CategoryForm,
  pub error:   Option<String>,
  pub busy:    bool
}

impl CategoryModalState {
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
pub struct CategoryModalProps {
  pub state:     CategoryModalState,
  pub on_change: Callback<CategoryForm>,
  pub on_close:  Callback<MouseEvent>,
  pub on_submit: Callback<MouseEvent>,
  pub on_delete: Callback<MouseEvent>
}

#[function_component(CategoryModal)]
pub fn category_modal(
  props: &CategoryModalProps
) -> Html {
  let form = props.state.form.clone();
  let editing =
    props.state.editing.is_some();

  let on_name = {
    let form = form.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(move |name: String| {
      on_change.emit(CategoryForm {
        name,
        ..form.clone()
      })
    })
  };
  let on_description = {
    let form = form.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(move |description: String| {
      on_change.emit(CategoryForm {
        description,
        ..form.clone()
      })
    })
  };

  html! {
      <div class="modal-backdrop" onclick={props.on_close.clone()}>
          <div class="modal modal-sm" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
              <div class="header">{ if editing { "Edit Category" } else { "New Category" } }</div>
              <div class="content">
                  <TextField label="Name" value={form.name.clone()} on_change={on_name} placeholder="Category name" />
                  <TextField label="Description" value={form.description.clone()} on_change={on_description} />
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
