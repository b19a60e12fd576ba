// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::MessageError as Error;
use crate::message::{Message, deserialize, typename_of};
use std::collections::HashMap;

/// A message whose concrete type is only known at runtime.
///
/// The [TypeRegistry] returns values of this type. Use
/// [downcast_ref][DynMessage#method.downcast_ref] to recover the concrete
/// message.
pub trait DynMessage: std::fmt::Debug + Send + Sync + 'static {
    /// The fully qualified name of the message type.
    fn name(&self) -> &'static str;

    #[doc(hidden)]
    fn as_any(&self) -> &dyn std::any::Any;
}

impl<T: Message> DynMessage for T {
    fn name(&self) -> &'static str {
        T::typename()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl dyn DynMessage {
    /// Returns true if the message is a `T`.
    pub fn is<T: Message>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Returns the message as a `T`, if that is its type.
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

type DecodeFn = fn(&[u8]) -> Result<Box<dyn DynMessage>, Error>;

fn decode_boxed<T: Message>(bytes: &[u8]) -> Result<Box<dyn DynMessage>, Error> {
    deserialize::<T>(bytes).map(|m| Box::new(m) as Box<dyn DynMessage>)
}

/// Maps fully qualified message names to their decoders.
///
/// Applications build a registry once, typically at startup, with all the
/// detail types they are prepared to handle. The registry is immutable once
/// built, and can be shared across threads.
///
/// # Example
/// ```
/// # use connect_message::{Message, TypeRegistry};
/// # #[derive(Clone, PartialEq, prost::Message)]
/// # pub struct RetryHint {
/// #     #[prost(int64, tag = "1")]
/// #     pub seconds: i64,
/// # }
/// # impl Message for RetryHint {
/// #     fn typename() -> &'static str { "example.v1.RetryHint" }
/// # }
/// let registry = TypeRegistry::new().register::<RetryHint>();
/// let bytes = connect_message::serialize(&RetryHint { seconds: 5 });
/// let decoded = registry.decode("example.v1.RetryHint", &bytes)?;
/// assert_eq!(decoded.downcast_ref::<RetryHint>().map(|h| h.seconds), Some(5));
/// # Ok::<(), connect_message::MessageError>(())
/// ```
#[derive(Clone, Default)]
pub struct TypeRegistry {
    decoders: HashMap<&'static str, DecodeFn>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `T` to the registry.
    ///
    /// Registering the same type twice has no effect.
    pub fn register<T: Message>(mut self) -> Self {
        self.decoders
            .insert(T::typename(), decode_boxed::<T> as DecodeFn);
        self
    }

    /// Returns true if the registry can decode messages tagged with `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.decoders.contains_key(typename_of(tag))
    }

    /// The number of registered types.
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// Returns true if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Decodes `bytes` as the message type named by `tag`.
    pub fn decode(&self, tag: &str, bytes: &[u8]) -> Result<Box<dyn DynMessage>, Error> {
        let decoder = self
            .decoders
            .get(typename_of(tag))
            .ok_or_else(|| Error::UnknownType(tag.to_string()))?;
        decoder(bytes)
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.decoders.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("TypeRegistry")
            .field("types", &names)
            .finish()
    }
}
