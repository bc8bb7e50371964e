mod adapter_kind;
mod batch_adapter;
mod label_codec;
mod options;
mod predictions;
mod validation;

pub use adapter_kind::AdapterKind;
pub use batch_adapter::BatchAdapter;
pub use label_codec::LabelCodec;
pub use options::AdapterOptions;
pub use predictions::Predictions;
pub use validation::{InputConstraints, validate};
