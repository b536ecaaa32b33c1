pub mod dock;
pub mod electrons;
