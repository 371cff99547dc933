pub mod appealmodel;
pub mod chatmodel;
pub mod couponmodel;
pub mod jobmodel;
pub mod notificationmodel;
pub mod supportmodel;
pub mod usermodel;
