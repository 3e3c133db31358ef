use tareas_shared::{
  Category,
  CategoryFilter,
  StatusFilter,
  TaskFilter
};
use web_sys::HtmlSelectElement;
use yew::{
  Callback,
  Event,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub filter:     TaskFilter,
  pub categories: Vec<Category>,
  pub on_status:  Callback<StatusFilter>,
  pub on_category:
    Callback<CategoryFilter>
}

/// Status buttons plus the category select. Changing either only
/// re-filters what is already loaded.
#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  let on_select = {
    let on_category =
      props.on_category.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      match select
        .value()
        .parse::<CategoryFilter>()
      {
        | Ok(filter) => {
          on_category.emit(filter)
        }
        | Err(err) => {
          tracing::warn!(error = %err, "ignoring unknown category option")
        }
      }
    })
  };

  let selected = props.filter.category;

  html! {
      <div class="filters">
          <div class="status-tabs">
              {
                  for StatusFilter::ALL.iter().copied().map(|status| {
                      let on_status = props.on_status.clone();
                      let active = props.filter.status == status;
                      html! {
                          <button
                              type="button"
                              class={classes!("btn", active.then_some("active"))}
                              onclick={move |_| on_status.emit(status)}
                          >
                              { status.label() }
                          </button>
                      }
                  })
              }
          </div>
          <select onchange={on_select}>
              <option value={CategoryFilter::All.to_string()} selected={selected == CategoryFilter::All}>
                  { "All categories" }
              </option>
              {
                  for props.categories.iter().map(|category| {
                      let value = CategoryFilter::Only(category.id);
                      html! {
                          <option value={value.to_string()} selected={selected == value}>
                              { &category.name }
                          </option>
                      }
                  })
              }
          </select>
      </div>
  }
}
