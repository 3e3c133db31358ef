mod category_list;
mod category_modal;
mod filter_bar;
mod nav_bar;
mod task_list;
mod task_list_row;
mod task_modal;
mod text_field;

pub use category_list::CategoryList;
pub use category_modal::{
  CategoryModal,
  CategoryModalState
};
pub use filter_bar::FilterBar;
pub use nav_bar::NavBar;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
pub use task_modal::{
  TaskModal,
  TaskModalState
};
pub use text_field::TextField;
