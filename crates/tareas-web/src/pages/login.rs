use yew::{
  Callback,
  Html,
  SubmitEvent,
  function_component,
  html,
  use_state
};
use yew_router::prelude::{
  Link,
  use_navigator
};

use crate::app::{
  Route,
  client
};
use crate::components::TextField;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
  let username = use_state(String::new);
  let password = use_state(String::new);
  let error =
    use_state(|| None::<String>);
  let busy = use_state(|| false);
  let navigator = use_navigator();

  let onsubmit = {
    let username = username.clone();
    let password = password.clone();
    let error = error.clone();
    let busy = busy.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        if *busy {
          return;
        }
        busy.set(true);
        error.set(None);

        let username =
          (*username).clone();
        let password =
          (*password).clone();
        let error = error.clone();
        let busy = busy.clone();
        let navigator = navigator.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            match client()
              .login(&username, &password)
              .await
            {
              | Ok(session) => {
                tracing::info!(user = %session.user_name, "signed in");
                if let Some(navigator) =
                  navigator
                {
                  navigator.push(&Route::Tasks);
                }
              }
              | Err(err) => {
                tracing::warn!(error = %err, "login failed");
                error.set(Some(
                  err.to_string()
                ));
                busy.set(false);
              }
            }
          }
        );
      }
    )
  };

  let set = |state: &yew::UseStateHandle<String>| {
    let state = state.clone();
    Callback::from(move |value: String| {
      state.set(value)
    })
  };

  html! {
      <div class="panel auth">
          <div class="header">{ "Sign in" }</div>
          <form {onsubmit}>
              <TextField label="Username" value={(*username).clone()} on_change={set(&username)} />
              <TextField label="Password" kind="password" value={(*password).clone()} on_change={set(&password)} />
              {
                  match &*error {
                      Some(message) => html! { <div class="error">{ message }</div> },
                      None => html! {},
                  }
              }
              <button type="submit" class="btn" disabled={*busy}>{ "Sign in" }</button>
          </form>
          <Link<Route> to={Route::Register}>{ "Create an account" }</Link<Route>>
      </div>
  }
}
