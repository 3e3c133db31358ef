use tareas_shared::RegistrationForm;
use yew::{
  Callback,
  Html,
  SubmitEvent,
  UseStateHandle,
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

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
  let form =
    use_state(RegistrationForm::default);
  let error =
    use_state(|| None::<String>);
  let busy = use_state(|| false);
  let navigator = use_navigator();

  let onsubmit = {
    let form = form.clone();
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

        let form = (*form).clone();
        let error = error.clone();
        let busy = busy.clone();
        let navigator = navigator.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            match client()
              .register(&form)
              .await
            {
              | Ok(()) => {
                gloo::dialogs::alert(
                  "Registration complete. \
                   You can now sign in."
                );
                if let Some(navigator) =
                  navigator
                {
                  navigator.push(&Route::Login);
                }
              }
              | Err(err) => {
                tracing::warn!(error = %err, "registration failed");
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

  let field = |form: &UseStateHandle<RegistrationForm>,
               apply: fn(&mut RegistrationForm, String)| {
    let form = form.clone();
    Callback::from(move |value: String| {
      let mut next = (*form).clone();
      apply(&mut next, value);
      form.set(next);
    })
  };

  html! {
      <div class="panel auth">
          <div class="header">{ "Create account" }</div>
          <form {onsubmit}>
              <TextField
                  label="Username"
                  value={form.username.clone()}
                  on_change={field(&form, |f, v| f.username = v)}
              />
              <TextField
                  label="Password"
                  kind="password"
                  value={form.password.clone()}
                  on_change={field(&form, |f, v| f.password = v)}
              />
              <TextField
                  label="Confirm password"
                  kind="password"
                  value={form.confirm.clone()}
                  on_change={field(&form, |f, v| f.confirm = v)}
              />
              {
                  match &*error {
                      Some(message) => html! { <div class="error">{ message }</div> },
                      None => html! {},
                  }
              }
              <button type="submit" class="btn" disabled={*busy}>{ "Register" }</button>
          </form>
          <Link<Route> to={Route::Login}>{ "Back to sign in" }</Link<Route>>
      </div>
  }
}
