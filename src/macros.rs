// Taken from serde_json and modified for NBT
// https://github.com/serde-rs/json/blob/829175e6069fb16672875f125f6afdd7c6da1dec/src/macros.rs#L60-L303
//
// The source uses the MIT license, which is repeated here:
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

/// Produce a [`Native`][`crate::Native`] value using JSON-like syntax.
///
/// ```rust
/// use nbtcodec::{native, Native};
/// let v = native!({
///     "key1": "value1",
///     "key2": 42,
///     "key3": [4, 2],
/// });
/// assert_eq!(v["key2"], Native::Int(42));
/// ```
///
/// Keys need quoted strings. Any other leaf is converted with
/// `Native::from`, so it can be a literal, a variable, a [`Tag`][`crate::Tag`]
/// or a [`TagValue`][`crate::TagValue`].
///
/// Arrays can be forced with
/// [SNBT](https://minecraft.wiki/w/NBT_format#SNBT_format) syntax. These
/// produce explicit tags and skip type inference:
///
/// ```rust
/// # use nbtcodec::native;
/// let _ = native!({
///     "bytes": [B; 1, 2, 3],
///     "ints": [I; 1, 2, 3],
///     "longs": [L; 1, 2, 3],
/// });
/// ```
#[macro_export(local_inner_macros)]
macro_rules! native {
    ($($native:tt)+) => {
        native_internal!($($native)+)
    };
}

#[macro_export(local_inner_macros)]
#[doc(hidden)]
macro_rules! native_internal {
    (@array [$($elems:expr,)*]) => {
        native_internal_vec![$($elems,)*]
    };

    (@array [$($elems:expr),*]) => {
        native_internal_vec![$($elems),*]
    };

    (@array [$($elems:expr,)*] [$($array:tt)*] $($rest:tt)*) => {
        native_internal!(@array [$($elems,)* native_internal!([$($array)*])] $($rest)*)
    };

    (@array [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        native_internal!(@array [$($elems,)* native_internal!({$($map)*})] $($rest)*)
    };

    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        native_internal!(@array [$($elems,)* native_internal!($next),] $($rest)*)
    };

    (@array [$($elems:expr,)*] $last:expr) => {
        native_internal!(@array [$($elems,)* native_internal!($last)])
    };

    (@array [$($elems:expr),*] , $($rest:tt)*) => {
        native_internal!(@array [$($elems,)*] $($rest)*)
    };

    (@array [$($elems:expr),*] $unexpected:tt $($rest:tt)*) => {
        native_unexpected!($unexpected)
    };

    // Elements of [B; ..], [I; ..] and [L; ..].

    (@int_array [$($elems:expr,)*]) => {
        native_internal_vec![$($elems,)*]
    };

    (@int_array [$($elems:expr),*]) => {
        native_internal_vec![$($elems),*]
    };

    (@int_array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        native_internal!(@int_array [$($elems,)* $next,] $($rest)*)
    };

    (@int_array [$($elems:expr,)*] $last:expr) => {
        native_internal!(@int_array [$($elems,)* $last])
    };

    (@int_array [$($elems:expr),*] , $($rest:tt)*) => {
        native_internal!(@int_array [$($elems,)*] $($rest)*)
    };

    (@int_array [$($elems:expr),*] $unexpected:tt $($rest:tt)*) => {
        native_unexpected!($unexpected)
    };

    (@object $object:ident () () ()) => {};

    (@object $object:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        let _ = $object.insert(($($key)+).into(), $value);
        native_internal!(@object $object () ($($rest)*) ($($rest)*));
    };

    (@object $object:ident [$($key:tt)+] ($value:expr) $unexpected:tt $($rest:tt)*) => {
        native_unexpected!($unexpected);
    };

    (@object $object:ident [$($key:tt)+] ($value:expr)) => {
        let _ = $object.insert(($($key)+).into(), $value);
    };

    (@object $object:ident ($($key:tt)+) (: [$($array:tt)*] $($rest:tt)*) $copy:tt) => {
        native_internal!(@object $object [$($key)+] (native_internal!([$($array)*])) $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: {$($map:tt)*} $($rest:tt)*) $copy:tt) => {
        native_internal!(@object $object [$($key)+] (native_internal!({$($map)*})) $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        native_internal!(@object $object [$($key)+] (native_internal!($value)) , $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: $value:expr) $copy:tt) => {
        native_internal!(@object $object [$($key)+] (native_internal!($value)));
    };

    // Missing value or misplaced punctuation: fail on the offending token.
    (@object $object:ident ($($key:tt)+) (:) $copy:tt) => {
        native_internal!();
    };

    (@object $object:ident ($($key:tt)+) () $copy:tt) => {
        native_internal!();
    };

    (@object $object:ident () (: $($rest:tt)*) ($colon:tt $($copy:tt)*)) => {
        native_unexpected!($colon);
    };

    (@object $object:ident ($($key:tt)*) (, $($rest:tt)*) ($comma:tt $($copy:tt)*)) => {
        native_unexpected!($comma);
    };

    // Parenthesized key.
    (@object $object:ident () (($key:expr) : $($rest:tt)*) $copy:tt) => {
        native_internal!(@object $object ($key) (: $($rest)*) (: $($rest)*));
    };

    (@object $object:ident ($($key:tt)*) (: $($unexpected:tt)+) $copy:tt) => {
        native_expect_expr_comma!($($unexpected)+);
    };

    (@object $object:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        native_internal!(@object $object ($($key)* $tt) ($($rest)*) ($($rest)*));
    };

    ([B;]) => {
        $crate::Native::from($crate::TagValue::ByteArray($crate::ByteArray::new(native_internal_vec![])))
    };

    ([I;]) => {
        $crate::Native::from($crate::TagValue::IntArray($crate::IntArray::new(native_internal_vec![])))
    };

    ([L;]) => {
        $crate::Native::from($crate::TagValue::LongArray($crate::LongArray::new(native_internal_vec![])))
    };

    ([]) => {
        $crate::Native::Seq(native_internal_vec![])
    };

    ([B; $($tt:tt)+ ]) => {
        $crate::Native::from($crate::TagValue::ByteArray($crate::ByteArray::new(
            native_internal!(@int_array [] $($tt)+)
        )))
    };

    ([I; $($tt:tt)+ ]) => {
        $crate::Native::from($crate::TagValue::IntArray($crate::IntArray::new(
            native_internal!(@int_array [] $($tt)+)
        )))
    };

    ([L; $($tt:tt)+ ]) => {
        $crate::Native::from($crate::TagValue::LongArray($crate::LongArray::new(
            native_internal!(@int_array [] $($tt)+)
        )))
    };

    ([ $($tt:tt)+ ]) => {
        $crate::Native::Seq(native_internal!(@array [] $($tt)+))
    };

    ({}) => {
        $crate::Native::Map($crate::NativeMap::new())
    };

    ({ $($tt:tt)+ }) => {
        $crate::Native::Map({
            let mut object = $crate::NativeMap::new();
            native_internal!(@object object () ($($tt)+) ($($tt)+));
            object
        })
    };

    // Anything with a From impl.
    ($other:expr) => {
        $crate::Native::from($other)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! native_unexpected {
    () => {};
}

#[macro_export]
#[doc(hidden)]
macro_rules! native_expect_expr_comma {
    ($e:expr , $($tt:tt)*) => {};
}

// Outside local_inner_macros so `vec!` resolves to std.
#[macro_export]
#[doc(hidden)]
macro_rules! native_internal_vec {
    ($($content:tt)*) => {
        vec![$($content)*]
    };
}
