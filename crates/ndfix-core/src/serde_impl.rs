//! Serde support (enabled with the `serde` feature)
//!
//! Arrays serialize as a flat sequence of their elements in row-major order
//! and deserialize from a sequence of exactly `S::LEN` elements.

use crate::array::NDArray;
use crate::shape::Shape;
use serde::de::{self, Deserialize, Deserializer, Expected};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

impl<T: Serialize, S: Shape> Serialize for NDArray<T, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut seq = serializer.serialize_seq(Some(S::LEN))?;
        for element in self.iter() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

struct ExpectedLen(usize);

impl Expected for ExpectedLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a sequence of exactly {} elements", self.0)
    }
}

impl<'de, T: Deserialize<'de>, S: Shape> Deserialize<'de> for NDArray<T, S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<T>::deserialize(deserializer)?;
        NDArray::from_vec(elements).map_err(|rejected| {
            <D::Error as de::Error>::invalid_length(rejected.len(), &ExpectedLen(S::LEN))
        })
    }
}
