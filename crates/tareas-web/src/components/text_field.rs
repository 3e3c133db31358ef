use web_sys::HtmlInputElement;
use yew::{
  AttrValue,
  Callback,
  Html,
  InputEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
  pub label:     AttrValue,
  pub value:     String,
  pub on_change: Callback<String>,
  #[prop_or(AttrValue::Static("text"))]
  pub kind:      AttrValue,
  #[prop_or_default]
  pub placeholder: AttrValue
}

#[function_component(TextField)]
pub fn text_field(
  props: &TextFieldProps
) -> Html {
  let oninput = {
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_change.emit(input.value());
      }
    )
  };

  html! {
      <div class="field">
          <label>{ props.label.clone() }</label>
          <input
              type={props.kind.clone()}
              value={props.value.clone()}
              placeholder={props.placeholder.clone()}
              {oninput}
          />
      </div>
  }
}
