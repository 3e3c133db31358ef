use tareas_shared::{
  Category,
  CategoryForm,
  CategoryId,
  ClientError
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_effect_with,
  use_state
};
use yew_router::prelude::use_navigator;

use crate::app::{
  Route,
  client,
  confirm
};
use crate::components::{
  CategoryList,
  CategoryModal,
  CategoryModalState,
  NavBar
};

/// What the list area shows. A successful fetch always replaces the
/// whole listing, which also drops any earlier error.
#[derive(Clone, Debug, Default, PartialEq)]
struct Listing {
  categories: Vec<Category>,
  error:      Option<String>
}

impl Listing {
  fn loaded(
    categories: Vec<Category>
  ) -> Self {
    Self {
      categories,
      error: None
    }
  }

  fn failed(
    &self,
    message: String
  ) -> Self {
    Self {
      error: Some(message),
      ..self.clone()
    }
  }
}

/// Category management. Read failures stay on the page as an inline error;
/// only a missing session sends the user back to login.
#[function_component(CategoriesPage)]
pub fn categories_page() -> Html {
  let listing =
    use_state(Listing::default);
  let modal = use_state(
    || None::<CategoryModalState>
  );
  let navigator = use_navigator();
  let user_name = client()
    .require_session()
    .map(|session| session.user_name)
    .unwrap_or_default();

  let to_login = {
    let navigator = navigator.clone();
    move || {
      if let Some(navigator) = &navigator
      {
        navigator.push(&Route::Login);
      }
    }
  };

  {
    let listing = listing.clone();
    let to_login = to_login.clone();

    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          match client()
            .list_categories()
            .await
          {
            | Ok(list) => {
              tracing::debug!(total = list.len(), "categories loaded");
              listing.set(Listing::loaded(list));
            }
            | Err(ClientError::NotAuthenticated) => {
              to_login()
            }
            | Err(err) => {
              tracing::warn!(error = %err, "category list failed");
              listing.set(
                listing.failed(err.to_string())
              );
            }
          }
        }
      );

      || ()
    });
  }

  let on_add_click = {
    let modal = modal.clone();
    Callback::from(
      move |_: MouseEvent| {
        modal.set(Some(
          CategoryModalState::default()
        ))
      }
    )
  };

  let on_edit = {
    let modal = modal.clone();
    let listing = listing.clone();
    Callback::from(
      move |id: CategoryId| {
        if let Some(category) = listing
          .categories
          .iter()
          .find(|category| category.id == id)
        {
          modal.set(Some(
            CategoryModalState {
              editing: Some(id),
              form: CategoryForm::from_category(
                category
              ),
              ..CategoryModalState::default()
            }
          ));
        }
      }
    )
  };

  let on_change = {
    let modal = modal.clone();
    Callback::from(
      move |form: CategoryForm| {
        if let Some(state) =
          (*modal).clone()
        {
          modal.set(Some(
            CategoryModalState {
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
    let listing = listing.clone();
    let to_login = to_login.clone();
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
          CategoryModalState {
            busy: true,
            error: None,
            ..state.clone()
          }
        ));

        let modal = modal.clone();
        let listing = listing.clone();
        let to_login = to_login.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            let web = client();
            let result = match state.editing
            {
              | Some(id) => {
                web
                  .update_category(
                    id,
                    &state.form
                  )
                  .await
              }
              | None => {
                web
                  .create_category(
                    &state.form
                  )
                  .await
              }
            };

            match result {
              | Ok(list) => {
                listing.set(Listing::loaded(list));
                modal.set(None);
              }
              | Err(ClientError::NotAuthenticated) => {
                to_login()
              }
              | Err(err) => {
                modal.set(Some(
                  state.failed(
                    err.to_string()
                  )
                ))
              }
            }
          }
        );
      }
    )
  };

  let on_delete = {
    let modal = modal.clone();
    let listing = listing.clone();
    let to_login = to_login.clone();
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
        let listing = listing.clone();
        let to_login = to_login.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            match client()
              .delete_category(id, || {
                confirm(
                  "Delete this category?"
                )
              })
              .await
            {
              | Ok(Some(list)) => {
                listing.set(Listing::loaded(list));
                modal.set(None);
              }
              | Ok(None) => {
                tracing::info!(%id, "category deletion canceled")
              }
              | Err(ClientError::NotAuthenticated) => {
                to_login()
              }
              | Err(err) => {
                modal.set(Some(
                  state.failed(
                    err.to_string()
                  )
                ))
              }
            }
          }
        );
      }
    )
  };

  let on_logout = {
    let to_login = to_login.clone();
    Callback::from(
      move |_: MouseEvent| {
        client().logout();
        to_login();
      }
    )
  };

  html! {
      <div class="page">
          <NavBar user_name={user_name} on_logout={on_logout} />
          <div class="toolbar">
              <div class="header">{ "Categories" }</div>
              <button type="button" class="btn" onclick={on_add_click}>{ "Add category" }</button>
          </div>
          {
              match &listing.error {
                  Some(message) => html! { <div class="error">{ message }</div> },
                  None => html! {
                      <CategoryList categories={listing.categories.clone()} on_edit={on_edit} />
                  },
              }
          }
          {
              match &*modal {
                  Some(state) => html! {
                      <CategoryModal
                          state={state.clone()}
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

#[cfg(test)]
mod tests {
  use super::*;

  fn category(
    id: i64,
    name: &str
  ) -> Category {
    Category {
      id:          CategoryId(id),
      name:        name.to_string(),
      description: None
    }
  }

  #[test]
  fn refresh_after_failed_load_shows_the_list() {
    let broken = Listing::default()
      .failed(
        "Could not load categories."
          .to_string()
      );
    assert!(broken.error.is_some());

    let refreshed = Listing::loaded(vec![
      category(1, "Home"),
    ]);
    assert_eq!(refreshed.error, None);
    assert_eq!(
      refreshed.categories,
      vec![category(1, "Home")]
    );
  }

  #[test]
  fn failure_keeps_the_previous_categories() {
    let listing =
      Listing::loaded(vec![category(
        2, "Work"
      )])
      .failed("boom".to_string());
    assert_eq!(
      listing.error.as_deref(),
      Some("boom")
    );
    assert_eq!(
      listing.categories.len(),
      1
    );
  }
}
