/// Function objects: shared metadata and native callbacks.
pub mod js_function;
/// JavaScript objects with fast/slow property storage and integrity state.
pub mod js_object;
/// Hidden class ([`map::Map`]), instance-type tag, and the property model.
pub mod map;
/// Top-level JavaScript value enum.
pub mod value;
