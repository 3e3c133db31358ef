use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};
use yew_router::prelude::Link;

use crate::app::Route;

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
  pub user_name: String,
  pub on_logout: Callback<MouseEvent>
}

#[function_component(NavBar)]
pub fn nav_bar(
  props: &NavBarProps
) -> Html {
  html! {
      <div class="panel nav">
          <Link<Route> to={Route::Tasks} classes="item">{ "Tasks" }</Link<Route>>
          <Link<Route> to={Route::Categories} classes="item">{ "Categories" }</Link<Route>>
          <span class="user">{ &props.user_name }</span>
          <button type="button" class="btn" onclick={props.on_logout.clone()}>
              { "Log out" }
          </button>
      </div>
  }
}
