use std::fmt;

/// A single named value passed to a SOAP method.
///
/// Fields without an XML name are accepted but never serialized, the same way
/// an untagged struct member is left out of the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    /// Local name of the element carrying the value
    pub xml_name: Option<String>,
    /// Textual form of the value
    pub value: String,
}

impl Field {
    /// Creates a field serialized as `<xml_name>value</xml_name>`.
    pub fn new<V: fmt::Display + ?Sized>(xml_name: &str, value: &V) -> Field {
        Field::from_parts(Some(xml_name), value)
    }

    /// Creates a field that is skipped when the envelope is built.
    pub fn unnamed<V: fmt::Display + ?Sized>(value: &V) -> Field {
        Field::from_parts(None, value)
    }

    #[doc(hidden)]
    pub fn from_parts<V: fmt::Display + ?Sized>(xml_name: Option<&str>, value: &V) -> Field {
        Field {
            xml_name: xml_name.map(str::to_owned),
            value: value.to_string(),
        }
    }

    /// The element name, if the field is to be serialized.
    pub fn xml_name(&self) -> Option<&str> {
        self.xml_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// The input of a SOAP method: a flat set of fields in declaration order.
///
/// Values that are not records (strings, numbers, `()`) keep the default
/// implementation and produce a method element without children.
pub trait Params {
    /// Enumerates the fields of this value.
    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }
}

macro_rules! impl_scalar_params {
    ($($t:ty),*) => {
        $(impl Params for $t {})*
    };
}

impl_scalar_params!(
    (),
    str,
    String,
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64
);

impl Params for [Field] {
    fn fields(&self) -> Vec<Field> {
        self.to_vec()
    }
}

impl<const N: usize> Params for [Field; N] {
    fn fields(&self) -> Vec<Field> {
        self.to_vec()
    }
}

impl Params for Vec<Field> {
    fn fields(&self) -> Vec<Field> {
        self.clone()
    }
}

impl<T> Params for &T
where
    T: Params + ?Sized,
{
    fn fields(&self) -> Vec<Field> {
        (**self).fields()
    }
}

/// Declares a parameter struct together with its [`Params`](crate::Params) implementation.
///
/// Members followed by `=> "Name"` are serialized as `<Name>value</Name>` using their
/// `Display` output; members without a name are kept in the struct but never sent.
///
/// # Example
/// ```
/// use soap_client::{soap_params, Params};
///
/// soap_params! {
///     pub struct GetPrice {
///         pub item: String => "Item",
///         pub quantity: u32 => "Quantity",
///         pub note: String,
///     }
/// }
///
/// let params = GetPrice {
///     item: "Apple".to_owned(),
///     quantity: 3,
///     note: "not sent".to_owned(),
/// };
/// let names: Vec<_> = params.fields().iter().filter_map(|f| f.xml_name().map(str::to_owned)).collect();
/// assert_eq!(names, ["Item", "Quantity"]);
/// ```
#[macro_export]
macro_rules! soap_params {
    (@name $xml:literal) => {
        ::std::option::Option::Some($xml)
    };
    (@name) => {
        ::std::option::Option::None
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty $(=> $xml:literal)? ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty, )*
        }

        impl $crate::Params for $name {
            fn fields(&self) -> ::std::vec::Vec<$crate::Field> {
                ::std::vec![
                    $( $crate::Field::from_parts($crate::soap_params!(@name $($xml)?), &self.$field), )*
                ]
            }
        }
    };
}
