//! Seed/step/finish reductions for building containers from decoded items.
//!
//! A [`Fold`] generalizes "accumulate decoded elements into a container"
//! without hard-coding container types: the collection coercer is
//! instantiated once per container kind with the matching fold. `step` is
//! fallible so a fold can enforce a per-call policy where the accumulator
//! lives, which is how the map fold applies the duplicate-key policy.

use crate::setting::{DuplicateKeyPolicy, PropertySetting};
use crate::{Error, Value};

pub trait Fold<T>: Send + Sync {
    type Acc;

    fn seed(&self) -> Self::Acc;

    fn step(&self, acc: &mut Self::Acc, item: T, setting: &PropertySetting) -> Result<(), Error>;

    fn finish(&self, acc: Self::Acc) -> Value;
}

/// Builds an ordered sequence.
#[derive(Debug, Default)]
pub struct ListFold;

impl Fold<Value> for ListFold {
    type Acc = Vec<Value>;

    fn seed(&self) -> Self::Acc {
        Vec::new()
    }

    fn step(&self, acc: &mut Self::Acc, item: Value, _: &PropertySetting) -> Result<(), Error> {
        acc.push(item);
        Ok(())
    }

    fn finish(&self, acc: Self::Acc) -> Value {
        Value::List(acc)
    }
}

/// Builds a unique-element container, keeping first-seen order and
/// silently dropping repeats.
#[derive(Debug, Default)]
pub struct SetFold;

impl Fold<Value> for SetFold {
    type Acc = Vec<Value>;

    fn seed(&self) -> Self::Acc {
        Vec::new()
    }

    fn step(&self, acc: &mut Self::Acc, item: Value, _: &PropertySetting) -> Result<(), Error> {
        if !acc.contains(&item) {
            acc.push(item);
        }
        Ok(())
    }

    fn finish(&self, acc: Self::Acc) -> Value {
        Value::Set(acc)
    }
}

/// Builds an insertion-ordered map from decoded entries, applying the
/// setting's duplicate-key policy.
#[derive(Debug, Default)]
pub struct MapFold;

impl Fold<(Value, Value)> for MapFold {
    type Acc = Vec<(Value, Value)>;

    fn seed(&self) -> Self::Acc {
        Vec::new()
    }

    fn step(
        &self,
        acc: &mut Self::Acc,
        (key, value): (Value, Value),
        setting: &PropertySetting,
    ) -> Result<(), Error> {
        if let Some(slot) = acc.iter_mut().find(|(k, _)| *k == key) {
            match setting.duplicates {
                DuplicateKeyPolicy::Fail => return Err(Error::DuplicateKey(key.to_string())),
                DuplicateKeyPolicy::LastWins => {
                    slot.1 = value;
                    return Ok(());
                }
            }
        }
        acc.push((key, value));
        Ok(())
    }

    fn finish(&self, acc: Self::Acc) -> Value {
        Value::Object(acc)
    }
}
