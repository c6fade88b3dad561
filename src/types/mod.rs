pub type OrderId = u64;
pub type CustomerId = u64;
