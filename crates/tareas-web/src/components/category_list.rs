use tareas_shared::{
  Category,
  CategoryId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct CategoryListProps {
  pub categories: Vec<Category>,
  pub on_edit:    Callback<CategoryId>
}

#[function_component(CategoryList)]
pub fn category_list(
  props: &CategoryListProps
) -> Html {
  if props.categories.is_empty() {
    return html! {
        <div class="panel list">
            <p class="empty">{ "No categories yet." }</p>
        </div>
    };
  }

  html! {
      <div class="panel list">
          {
              for props.categories.iter().map(|category| {
                  let id = category.id;
                  let on_edit = props.on_edit.clone();
                  let description = category.description.clone().unwrap_or_default();
                  html! {
                      <div class="row">
                          <div>
                              <div>{ &category.name }</div>
                              <div class="task-subtitle">{ description }</div>
                          </div>
                          <button type="button" class="btn" onclick={move |_| on_edit.emit(id)}>
                              { "Edit" }
                          </button>
                      </div>
                  }
              })
          }
      </div>
  }
}
