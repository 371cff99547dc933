pub mod appealdtos;
pub mod chatdtos;
pub mod coupondtos;
pub mod jobdtos;
pub mod supportdtos;
pub mod userdtos;
