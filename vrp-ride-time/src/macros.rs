//! Macros which generate typed accessors over type keyed storages.

/// Generates `XxxDimension` trait with `get_xxx`/`set_xxx` methods on [crate::models::common::Dimensions].
macro_rules! custom_dimension {
    ($name:ident typeof $type:ty) => {
        paste::paste! {
            #[doc = " Provides typed access to `" $name "` property of [Dimensions]."]
            pub trait [<$name Dimension>] {
                #[doc = " Returns `" $name "` property, if set."]
                fn [<get_ $name:snake:lower>](&self) -> Option<&$type>;
                #[doc = " Sets `" $name "` property."]
                fn [<set_ $name:snake:lower>](&mut self, value: $type) -> &mut Self;
            }

            struct [<$name DimensionKey>];

            impl [<$name Dimension>] for Dimensions {
                fn [<get_ $name:snake:lower>](&self) -> Option<&$type> {
                    self.get_value::<[<$name DimensionKey>], $type>()
                }

                fn [<set_ $name:snake:lower>](&mut self, value: $type) -> &mut Self {
                    self.set_value::<[<$name DimensionKey>], $type>(value);
                    self
                }
            }
        }
    };
}

/// Generates `XxxTourState` trait with `get_xxx`/`set_xxx` methods on
/// [crate::construction::heuristics::RouteState]. With `copied by` the value is copied by the given
/// function when the state is copied deeply, otherwise copies share it.
macro_rules! custom_tour_state {
    (@set $state:ident, $key:ident, $type:ty, $value:ident) => {
        $state.set_tour_state::<$key, $type>($value)
    };
    (@set $state:ident, $key:ident, $type:ty, $value:ident, $copy:path) => {
        $state.set_copied_tour_state::<$key, $type>($value, $copy)
    };
    ($name:ident typeof $type:ty $(, copied by $copy:path)?) => {
        paste::paste! {
            #[doc = " Provides typed access to `" $name "` value of [RouteState]."]
            pub trait [<$name TourState>] {
                #[doc = " Returns `" $name "` value, if set."]
                fn [<get_ $name:snake:lower>](&self) -> Option<&$type>;
                #[doc = " Sets `" $name "` value."]
                fn [<set_ $name:snake:lower>](&mut self, value: $type);
            }

            struct [<$name TourStateKey>];

            impl [<$name TourState>] for RouteState {
                fn [<get_ $name:snake:lower>](&self) -> Option<&$type> {
                    self.get_tour_state::<[<$name TourStateKey>], $type>()
                }

                fn [<set_ $name:snake:lower>](&mut self, value: $type) {
                    custom_tour_state!(@set self, [<$name TourStateKey>], $type, value $(, $copy)?)
                }
            }
        }
    };
}
