pub mod cart;
pub mod login;
pub mod orders;
pub mod product_form;
pub mod products;
pub mod register;
