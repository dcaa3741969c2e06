//! xinsert_decode: turn loosely typed driver rows into typed values.
//! - Data model shared with the store crate (`ColumnDescriptor`, `RawRow`, `DecodedValue`)
//! - A declared-type dispatch table of pure decode functions
//! - The row dispatcher that logs rows and forwards values to the delivery queue

pub mod dispatch;
pub mod queue;
pub mod row;
pub mod value;

pub use dispatch::{DecodeError, DecodeFn, TypeFamily, decode_value, decoder_for};
pub use queue::{DeliveryReceiver, DeliverySender, QUEUE_CAPACITY, delivery_queue, spawn_consumer};
pub use row::{RowDispatcher, decode_row};
pub use value::{ColumnDescriptor, DecodedValue, RawRow, RawValue};
