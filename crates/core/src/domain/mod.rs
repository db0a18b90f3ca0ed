pub mod employee;
pub mod work_order;
