// inspector_core/src/reflect/enums.rs

/// Implements `ReflectValue` for a fieldless enum through `strum`.
///
/// The enum needs `Clone` plus the `strum_macros` derives `IntoStaticStr`,
/// `EnumString` and `VariantNames`.
#[macro_export]
macro_rules! reflect_enum {
    ($ty:ty) => {
        impl $crate::reflect::ReflectValue for $ty {
            fn to_value(
                &self,
            ) -> ::std::result::Result<$crate::reflect::Value, $crate::error::AccessError> {
                let variant: &'static str = ::std::convert::From::from(self);
                ::std::result::Result::Ok($crate::reflect::Value::Enum($crate::reflect::EnumValue {
                    type_name: $crate::reflect::short_type_name(::std::any::type_name::<$ty>()),
                    variant,
                    variants: <$ty as $crate::__private::VariantNames>::VARIANTS,
                }))
            }

            fn from_value(
                value: $crate::reflect::Value,
            ) -> ::std::result::Result<Self, $crate::error::AccessError> {
                let variant = match value {
                    $crate::reflect::Value::Enum(e) => e.variant.to_string(),
                    $crate::reflect::Value::Text(t) => t,
                    other => {
                        return ::std::result::Result::Err(
                            $crate::error::AccessError::type_mismatch(
                                ::std::any::type_name::<$ty>(),
                                &other,
                            ),
                        )
                    }
                };
                variant.parse::<$ty>().map_err(|_| $crate::error::AccessError::UnknownVariant {
                    type_name: ::std::any::type_name::<$ty>(),
                    variant,
                })
            }

            fn value_kind() -> $crate::reflect::ValueKind {
                $crate::reflect::ValueKind::Enum
            }
        }
    };
}

/// Last path segment of a type name, `a::b::Light` becomes `Light`.
pub fn short_type_name(path: &'static str) -> &'static str {
    let base = path.split('<').next().unwrap_or(path);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::short_type_name;
    use crate::reflect::{ReflectValue, Value, ValueKind};
    use strum_macros::{EnumString, IntoStaticStr, VariantNames};

    #[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr, EnumString, VariantNames)]
    enum Falloff {
        Linear,
        Quadratic,
    }
    crate::reflect_enum!(Falloff);

    #[test]
    fn enum_round_trips_through_variant_names() {
        let Value::Enum(e) = Falloff::Quadratic.to_value().expect("in range") else {
            panic!("expected an enum value");
        };
        assert_eq!(e.type_name, "Falloff");
        assert_eq!(e.variant, "Quadratic");
        assert_eq!(e.variants, &["Linear", "Quadratic"]);
        assert_eq!(Falloff::from_value(Value::Text("Linear".into())), Ok(Falloff::Linear));
        assert!(Falloff::from_value(Value::Text("Cubic".into())).is_err());
        assert_eq!(Falloff::value_kind(), ValueKind::Enum);
    }

    #[test]
    fn short_names_drop_paths_and_generics() {
        assert_eq!(short_type_name("game::light::PointLight"), "PointLight");
        assert_eq!(short_type_name("alloc::vec::Vec<i32>"), "Vec");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}
