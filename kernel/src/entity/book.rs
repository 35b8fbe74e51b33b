mod isbn;
mod price;
mod stock;
mod title;

pub use self::{isbn::*, price::*, stock::*, title::*};

use error_stack::Report;
use time::OffsetDateTime;
use vodca::References;

use crate::entity::{CreatedAt, UpdatedAt};
use crate::KernelError;

/// Book aggregate. `stock` is only ever changed through [`Book::decrease_stock`] and
/// [`Book::increase_stock`], which keep it at zero or above.
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct Book {
    isbn: BookIsbn,
    title: BookTitle,
    price: BookPrice,
    stock: BookStock,
    created_at: CreatedAt<Book>,
    updated_at: UpdatedAt<Book>,
}

impl Book {
    pub fn new(
        isbn: BookIsbn,
        title: BookTitle,
        price: BookPrice,
        stock: BookStock,
        created_at: CreatedAt<Book>,
        updated_at: UpdatedAt<Book>,
    ) -> Self {
        Self {
            isbn,
            title,
            price,
            stock,
            created_at,
            updated_at,
        }
    }

    pub fn create(
        isbn: BookIsbn,
        title: BookTitle,
        price: BookPrice,
        stock: BookStock,
    ) -> error_stack::Result<Self, KernelError> {
        if isbn.as_ref().trim().is_empty() {
            return Err(Report::new(KernelError::invalid_argument("isbn is required")));
        }
        if title.is_blank() {
            return Err(Report::new(KernelError::invalid_argument("title is required")));
        }
        if *price.as_ref() < 0 {
            return Err(Report::new(KernelError::invalid_argument(
                "price must be 0 or greater",
            )));
        }
        if *stock.as_ref() < 0 {
            return Err(Report::new(KernelError::invalid_argument(
                "initial stock must be 0 or greater",
            )));
        }
        let now = OffsetDateTime::now_utc();
        Ok(Self {
            isbn,
            title,
            price,
            stock,
            created_at: CreatedAt::new(now),
            updated_at: UpdatedAt::new(now),
        })
    }

    pub fn validate_stock(&self, quantity: i32) -> error_stack::Result<(), KernelError> {
        if quantity <= 0 {
            return Err(Report::new(KernelError::InvalidQuantity { quantity }));
        }
        let available = *self.stock.as_ref();
        if available < quantity {
            return Err(Report::new(KernelError::InsufficientStock {
                isbn: self.isbn.to_string(),
                title: self.title.as_ref().clone(),
                requested: quantity,
                available,
            }));
        }
        Ok(())
    }

    pub fn decrease_stock(&mut self, quantity: i32) -> error_stack::Result<(), KernelError> {
        self.validate_stock(quantity)?;
        self.stock = BookStock::new(*self.stock.as_ref() - quantity);
        self.updated_at.stamp();
        Ok(())
    }

    pub fn increase_stock(&mut self, quantity: i32) -> error_stack::Result<(), KernelError> {
        if quantity <= 0 {
            return Err(Report::new(KernelError::InvalidQuantity { quantity }));
        }
        let increased = self.stock.as_ref().checked_add(quantity).ok_or_else(|| {
            Report::new(KernelError::invalid_argument(format!(
                "stock of {} would overflow",
                self.isbn
            )))
        })?;
        self.stock = BookStock::new(increased);
        self.updated_at.stamp();
        Ok(())
    }

    pub fn update_price(&mut self, price: BookPrice) -> error_stack::Result<(), KernelError> {
        if *price.as_ref() < 0 {
            return Err(Report::new(KernelError::invalid_argument(
                "price must be 0 or greater",
            )));
        }
        self.price = price;
        self.updated_at.stamp();
        Ok(())
    }

    /// Replaces the title. `updated_at` only moves when the title actually changes.
    pub fn rename(&mut self, title: BookTitle) -> error_stack::Result<(), KernelError> {
        if title.is_blank() {
            return Err(Report::new(KernelError::invalid_argument("title is required")));
        }
        if self.title != title {
            self.title = title;
            self.updated_at.stamp();
        }
        Ok(())
    }

    pub fn ensure_deletable(&self) -> error_stack::Result<(), KernelError> {
        let stock = *self.stock.as_ref();
        if stock > 0 {
            return Err(Report::new(KernelError::BookHasStock {
                isbn: self.isbn.to_string(),
                stock,
            }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{Book, BookIsbn, BookPrice, BookStock, BookTitle};
    use crate::KernelError;

    fn book(stock: i32) -> Book {
        Book::create(
            BookIsbn::new("9784297100339"),
            BookTitle::new("Rust Book"),
            BookPrice::new(3200),
            BookStock::new(stock),
        )
        .unwrap()
    }

    #[test]
    fn create_rejects_malformed_fields() {
        let cases = [
            ("", "title", 0, 0),
            ("9784297100339", "  ", 0, 0),
            ("9784297100339", "title", -1, 0),
            ("9784297100339", "title", 0, -1),
        ];
        for (isbn, title, price, stock) in cases {
            let result = Book::create(
                BookIsbn::new(isbn),
                BookTitle::new(title),
                BookPrice::new(price),
                BookStock::new(stock),
            );
            let error = result.unwrap_err();
            assert!(
                matches!(error.current_context(), KernelError::InvalidArgument { .. }),
                "{isbn:?} {title:?} {price} {stock}"
            );
        }
    }

    #[test]
    fn create_stamps_both_timestamps_with_the_same_instant() {
        let book = book(1);
        assert_eq!(book.created_at().as_ref(), book.updated_at().as_ref());
    }

    #[test]
    fn decrease_reduces_stock() {
        let mut book = book(10);
        book.decrease_stock(3).unwrap();
        assert_eq!(book.stock(), &BookStock::new(7));
        book.decrease_stock(7).unwrap();
        assert_eq!(book.stock(), &BookStock::new(0));
    }

    #[test]
    fn decrease_beyond_stock_reports_the_shortage() {
        let mut book = book(10);
        let error = book.decrease_stock(11).unwrap_err();
        assert_eq!(
            error.current_context(),
            &KernelError::InsufficientStock {
                isbn: "9784297100339".to_string(),
                title: "Rust Book".to_string(),
                requested: 11,
                available: 10,
            }
        );
        assert_eq!(book.stock(), &BookStock::new(10));
    }

    #[test]
    fn non_positive_quantities_are_rejected() {
        let mut book = book(10);
        for quantity in [0, -1] {
            let error = book.decrease_stock(quantity).unwrap_err();
            assert_eq!(
                error.current_context(),
                &KernelError::InvalidQuantity { quantity }
            );
            let error = book.increase_stock(quantity).unwrap_err();
            assert_eq!(
                error.current_context(),
                &KernelError::InvalidQuantity { quantity }
            );
        }
        assert_eq!(book.stock(), &BookStock::new(10));
    }

    #[test]
    fn increase_adds_to_stock() {
        let mut book = book(0);
        book.increase_stock(5).unwrap();
        assert_eq!(book.stock(), &BookStock::new(5));
    }

    #[test]
    fn increase_refuses_to_overflow() {
        let mut book = book(i32::MAX);
        assert!(book.increase_stock(1).is_err());
        assert_eq!(book.stock(), &BookStock::new(i32::MAX));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut book = book(0);
        assert!(book.update_price(BookPrice::new(-1)).is_err());
        book.update_price(BookPrice::new(0)).unwrap();
        assert_eq!(book.price(), &BookPrice::new(0));
    }

    #[test]
    fn only_books_without_stock_are_deletable() {
        assert!(book(0).ensure_deletable().is_ok());
        let error = book(2).ensure_deletable().unwrap_err();
        assert_eq!(
            error.current_context(),
            &KernelError::BookHasStock {
                isbn: "9784297100339".to_string(),
                stock: 2,
            }
        );
    }
}
