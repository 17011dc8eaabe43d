pub mod activity;
pub mod audit;
pub mod control;
pub mod dispatch;
pub mod implementation;
pub mod request;
pub mod shared;
pub mod standard;
