mod book;
mod customer;
mod order;

pub use self::{book::*, customer::*, order::*};
