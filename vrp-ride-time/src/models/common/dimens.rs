use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// A type keyed property bag attached to jobs and vehicles: ids, job tasks, a back reference
/// from a shipment part to its shipment. Typed accessors are generated by `custom_dimension!`.
#[derive(Clone, Debug, Default)]
pub struct Dimensions {
    values: FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Dimensions {
    /// Returns a value stored under `K` key if it has `V` type.
    pub fn get_value<K: 'static, V: 'static>(&self) -> Option<&V> {
        self.values.get(&TypeId::of::<K>())?.downcast_ref::<V>()
    }

    /// Stores a value under `K` key.
    pub fn set_value<K: 'static, V: 'static + Sync + Send>(&mut self, value: V) {
        self.values.insert(TypeId::of::<K>(), Arc::new(value));
    }
}
