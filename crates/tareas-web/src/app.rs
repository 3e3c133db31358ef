use tareas_shared::TaskClient;
use yew::{
  Html,
  function_component,
  html
};
use yew_router::prelude::{
  BrowserRouter,
  Redirect,
  Routable,
  Switch
};

use crate::pages::{
  CategoriesPage,
  LoginPage,
  RegisterPage,
  TasksPage
};
use crate::storage::LocalStorageSession;
use crate::transport::GlooTransport;

pub type WebClient =
  TaskClient<GlooTransport, LocalStorageSession>;

/// Both halves are stateless handles, so every page builds its own.
pub fn client() -> WebClient {
  TaskClient::new(
    GlooTransport::default(),
    LocalStorageSession
  )
}

#[derive(
  Clone,
  Debug,
  PartialEq,
  Routable,
)]
pub enum Route {
  #[at("/")]
  Tasks,
  #[at("/categories")]
  Categories,
  #[at("/login")]
  Login,
  #[at("/register")]
  Register,
  #[not_found]
  #[at("/404")]
  NotFound
}

impl Route {
  fn is_protected(&self) -> bool {
    matches!(
      self,
      Route::Tasks | Route::Categories
    )
  }
}

fn switch(route: Route) -> Html {
  if route.is_protected()
    && client().require_session().is_err()
  {
    tracing::info!(?route, "no session; redirecting to login");
    return html! { <Redirect<Route> to={Route::Login} /> };
  }

  match route {
    | Route::Tasks => {
      html! { <TasksPage /> }
    }
    | Route::Categories => {
      html! { <CategoriesPage /> }
    }
    | Route::Login => {
      html! { <LoginPage /> }
    }
    | Route::Register => {
      html! { <RegisterPage /> }
    }
    | Route::NotFound => {
      html! { <Redirect<Route> to={Route::Tasks} /> }
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  html! {
      <BrowserRouter>
          <Switch<Route> render={switch} />
      </BrowserRouter>
  }
}

/// Browser confirm dialog; a missing window counts as "no".
pub fn confirm(message: &str) -> bool {
  web_sys::window()
    .and_then(|window| {
      window
        .confirm_with_message(message)
        .ok()
    })
    .unwrap_or(false)
}
