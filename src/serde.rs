//! (De)serialization of bags as maps from values to multiplicities

use crate::{
    bag::BagBase,
    count::{CountError, IntoCount, validate_count},
    error::BagError,
    policy::{Mutability, Ordering},
    store::CountStore,
};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
};
use std::{fmt, hash::Hash, marker::PhantomData, num::NonZeroUsize};

impl<T: Serialize, M: Mutability, O: Ordering> Serialize for BagBase<T, M, O> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(value, count)| (value, count.get())))
    }
}

impl<'de, T, M, O> Deserialize<'de> for BagBase<T, M, O>
where
    T: Deserialize<'de> + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BagVisitor(PhantomData))
    }
}

/// Visitor that accumulates map entries into a bag
///
/// Zero multiplicities are dropped and repeated keys add up, as they would
/// through [`from_counts()`](BagBase::from_counts).
struct BagVisitor<T, M, O>(PhantomData<fn() -> BagBase<T, M, O>>);
//
impl<'de, T, M, O> Visitor<'de> for BagVisitor<T, M, O>
where
    T: Deserialize<'de> + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    type Value = BagBase<T, M, O>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map from values to their multiplicities")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut store = CountStore::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((value, count)) = access.next_entry::<T, RawCount>()? {
            let count = validate_count(count)
                .map_err(BagError::from)
                .map_err(de::Error::custom)?;
            if let Some(count) = NonZeroUsize::new(count) {
                store.add(value, count).map_err(de::Error::custom)?;
            }
        }
        Ok(BagBase::from_store(store))
    }
}

/// Count as found in the serialized data, before validation
///
/// Counts are read as whatever number the format holds so that negative,
/// fractional and non-finite values are reported by [`validate_count()`]
/// like they would be by [`from_counts()`](BagBase::from_counts).
#[derive(Clone, Copy, Debug)]
enum RawCount {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}
//
impl IntoCount for RawCount {
    fn into_count(self) -> Result<usize, CountError> {
        match self {
            Self::Unsigned(count) => count.into_count(),
            Self::Signed(count) => count.into_count(),
            Self::Float(count) => count.into_count(),
        }
    }
}
//
impl<'de> Deserialize<'de> for RawCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawCountVisitor)
    }
}

struct RawCountVisitor;
//
impl Visitor<'_> for RawCountVisitor {
    type Value = RawCount;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawCount, E> {
        Ok(RawCount::Unsigned(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawCount, E> {
        Ok(RawCount::Signed(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawCount, E> {
        Ok(RawCount::Float(v))
    }
}

#[cfg(test)]
mod test {
    use crate::{Bag, BagError, CountError, FrozenBag, FrozenOrderedBag, OrderedBag};

    fn strings(contents: &str) -> impl Iterator<Item = String> + '_ {
        contents.chars().map(String::from)
    }

    #[test]
    fn serialize_in_iteration_order() {
        let bag = OrderedBag::from_iter(strings("abracadabra"));
        assert_eq!(
            serde_json::to_string(&bag).unwrap(),
            r#"{"a":5,"b":2,"r":2,"c":1,"d":1}"#
        );
        assert_eq!(serde_json::to_string(&Bag::<String>::new()).unwrap(), "{}");
    }

    #[test]
    fn round_trip() {
        let bag = FrozenOrderedBag::from_iter(strings("abracadabra"));
        let json = serde_json::to_string(&bag).unwrap();
        let back: FrozenOrderedBag<String> = serde_json::from_str(&json).unwrap();
        assert!(back.eq_ordered(&bag));

        let back: FrozenBag<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bag);
    }

    #[test]
    fn lenient_input() {
        let bag: Bag<String> = serde_json::from_str(r#"{"a":2,"b":0,"c":1}"#).unwrap();
        assert_eq!(bag, Bag::from_iter(strings("aac")));
        assert!(!bag.contains("b"));

        let json = r#"{"a":2.0,"b":0.0,"c":1,"a":1}"#;
        let bag: Bag<String> = serde_json::from_str(json).unwrap();
        let expected = Bag::from_counts([("a".to_owned(), 3.0), ("c".to_owned(), 1.0)]).unwrap();
        assert_eq!(bag, expected);
        assert!(!bag.contains("b"));
    }

    fn rejection(json: &str) -> String {
        serde_json::from_str::<Bag<String>>(json).unwrap_err().to_string()
    }

    #[test]
    fn invalid_counts() {
        let negative = BagError::from(CountError::Negative).to_string();
        let fractional = BagError::from(CountError::Fractional).to_string();
        assert!(rejection(r#"{"a":-1}"#).contains(&negative));
        assert!(rejection(r#"{"a":-2.0}"#).contains(&negative));
        assert!(rejection(r#"{"a":1.5}"#).contains(&fractional));
        assert!(rejection(r#"{"a":"1"}"#).contains("expected a number"));
        assert!(rejection(r#"["a"]"#).contains("expected a map"));
    }
}
