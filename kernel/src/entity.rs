mod book;
mod common;
mod customer;
mod order;

pub use self::{book::*, common::*, customer::*, order::*};
