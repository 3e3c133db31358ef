mod categories;
mod login;
mod register;
mod tasks;

pub use categories::CategoriesPage;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use tasks::TasksPage;
