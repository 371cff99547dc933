pub mod appealdb;
pub mod chatdb;
pub mod coupondb;
pub mod db;
pub mod jobdb;
pub mod notificationdb;
pub mod supportdb;
pub mod userdb;
