pub mod author;
pub mod book;
pub mod customer;
pub mod genre;
pub mod order;
pub mod order_detail;
pub mod publisher;
pub mod review;

pub use book::BookDetails;
