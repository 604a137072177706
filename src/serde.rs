use crate::{Element, SpillVec};
use serde_core::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
    ser::SerializeSeq,
};

/// Upper bound on the bytes reserved up front from an untrusted length hint.
const MAX_PREALLOC_BYTES: usize = 1024 * 1024;

/// Slots to reserve for a sequence announcing `hint` elements.
#[inline]
fn cautious(hint: usize) -> usize {
    hint.min(MAX_PREALLOC_BYTES / core::mem::size_of::<Element>())
}

impl<const N: usize> Serialize for SpillVec<N> {
    /// Serialize a `SpillVec` as a sequence of its live elements.
    ///
    /// The format is identical whether the data is stored inline or on the heap.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, const N: usize> Deserialize<'de> for SpillVec<N> {
    /// Deserialize a `SpillVec` from a sequence.
    ///
    /// Spills to the heap when the sequence does not fit inline. The length
    /// hint only pre-sizes the buffer up to 1 MiB; longer sequences grow as
    /// they are read. Allocation failures are reported as deserialization
    /// errors.
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SpillVecVisitor<const N: usize>;

        impl<'de, const N: usize> Visitor<'de> for SpillVecVisitor<N> {
            type Value = SpillVec<N>;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a sequence of integers")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut vec = match seq.size_hint().map(cautious) {
                    Some(hint) if hint > 0 => {
                        SpillVec::make(hint).map_err(<A::Error as de::Error>::custom)?
                    }
                    _ => SpillVec::new(),
                };

                while let Some(element) = seq.next_element::<Element>()? {
                    vec.push(element).map_err(<A::Error as de::Error>::custom)?;
                }

                Ok(vec)
            }
        }

        deserializer.deserialize_seq(SpillVecVisitor::<N>)
    }
}
