//! Homogeneous numeric arrays (RFC 8746).

/// Element type of a typed array, one per supported tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    Uint8,
    Uint8Clamped,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl TypedArrayKind {
    /// Maps an RFC 8746 tag number to its element type.
    ///
    /// Only the little-endian and byte-order-neutral tags are recognized.
    pub fn from_tag(tag: u64) -> Option<TypedArrayKind> {
        match tag {
            64 => Some(TypedArrayKind::Uint8),
            68 => Some(TypedArrayKind::Uint8Clamped),
            69 => Some(TypedArrayKind::Uint16),
            70 => Some(TypedArrayKind::Uint32),
            71 => Some(TypedArrayKind::Uint64),
            72 => Some(TypedArrayKind::Int8),
            77 => Some(TypedArrayKind::Int16),
            78 => Some(TypedArrayKind::Int32),
            79 => Some(TypedArrayKind::Int64),
            85 => Some(TypedArrayKind::Float32),
            86 => Some(TypedArrayKind::Float64),
            _ => None,
        }
    }

    /// Returns the tag number for this element type.
    pub fn tag(self) -> u64 {
        match self {
            TypedArrayKind::Uint8 => 64,
            TypedArrayKind::Uint8Clamped => 68,
            TypedArrayKind::Uint16 => 69,
            TypedArrayKind::Uint32 => 70,
            TypedArrayKind::Uint64 => 71,
            TypedArrayKind::Int8 => 72,
            TypedArrayKind::Int16 => 77,
            TypedArrayKind::Int32 => 78,
            TypedArrayKind::Int64 => 79,
            TypedArrayKind::Float32 => 85,
            TypedArrayKind::Float64 => 86,
        }
    }

    /// Returns the width of one element in bytes.
    pub fn element_width(self) -> usize {
        match self {
            TypedArrayKind::Uint8 | TypedArrayKind::Uint8Clamped | TypedArrayKind::Int8 => 1,
            TypedArrayKind::Uint16 | TypedArrayKind::Int16 => 2,
            TypedArrayKind::Uint32 | TypedArrayKind::Int32 | TypedArrayKind::Float32 => 4,
            TypedArrayKind::Uint64 | TypedArrayKind::Int64 | TypedArrayKind::Float64 => 8,
        }
    }

    /// Short element type name used in diagnostic output.
    pub fn name(self) -> &'static str {
        match self {
            TypedArrayKind::Uint8 => "u8",
            TypedArrayKind::Uint8Clamped => "u8c",
            TypedArrayKind::Uint16 => "u16",
            TypedArrayKind::Uint32 => "u32",
            TypedArrayKind::Uint64 => "u64",
            TypedArrayKind::Int8 => "i8",
            TypedArrayKind::Int16 => "i16",
            TypedArrayKind::Int32 => "i32",
            TypedArrayKind::Int64 => "i64",
            TypedArrayKind::Float32 => "f32",
            TypedArrayKind::Float64 => "f64",
        }
    }
}

/// A byte string reinterpreted as little-endian numeric elements.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
    Uint64(Vec<u64>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl TypedArray {
    /// Reinterprets `bytes` as little-endian elements of `kind`.
    ///
    /// Returns `None` if the length is not a multiple of the element width.
    pub fn from_le_bytes(kind: TypedArrayKind, bytes: &[u8]) -> Option<TypedArray> {
        if bytes.len() % kind.element_width() != 0 {
            return None;
        }
        let array = match kind {
            TypedArrayKind::Uint8 => TypedArray::Uint8(bytes.to_vec()),
            TypedArrayKind::Uint8Clamped => TypedArray::Uint8Clamped(bytes.to_vec()),
            TypedArrayKind::Uint16 => TypedArray::Uint16(elements(bytes, u16::from_le_bytes)),
            TypedArrayKind::Uint32 => TypedArray::Uint32(elements(bytes, u32::from_le_bytes)),
            TypedArrayKind::Uint64 => TypedArray::Uint64(elements(bytes, u64::from_le_bytes)),
            TypedArrayKind::Int8 => TypedArray::Int8(elements(bytes, i8::from_le_bytes)),
            TypedArrayKind::Int16 => TypedArray::Int16(elements(bytes, i16::from_le_bytes)),
            TypedArrayKind::Int32 => TypedArray::Int32(elements(bytes, i32::from_le_bytes)),
            TypedArrayKind::Int64 => TypedArray::Int64(elements(bytes, i64::from_le_bytes)),
            TypedArrayKind::Float32 => TypedArray::Float32(elements(bytes, f32::from_le_bytes)),
            TypedArrayKind::Float64 => TypedArray::Float64(elements(bytes, f64::from_le_bytes)),
        };
        Some(array)
    }

    /// Returns the element type.
    pub fn kind(&self) -> TypedArrayKind {
        match self {
            TypedArray::Uint8(_) => TypedArrayKind::Uint8,
            TypedArray::Uint8Clamped(_) => TypedArrayKind::Uint8Clamped,
            TypedArray::Uint16(_) => TypedArrayKind::Uint16,
            TypedArray::Uint32(_) => TypedArrayKind::Uint32,
            TypedArray::Uint64(_) => TypedArrayKind::Uint64,
            TypedArray::Int8(_) => TypedArrayKind::Int8,
            TypedArray::Int16(_) => TypedArrayKind::Int16,
            TypedArray::Int32(_) => TypedArrayKind::Int32,
            TypedArray::Int64(_) => TypedArrayKind::Int64,
            TypedArray::Float32(_) => TypedArrayKind::Float32,
            TypedArray::Float64(_) => TypedArrayKind::Float64,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        match self {
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => v.len(),
            TypedArray::Uint16(v) => v.len(),
            TypedArray::Uint32(v) => v.len(),
            TypedArray::Uint64(v) => v.len(),
            TypedArray::Int8(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::Int64(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn elements<const N: usize, T>(bytes: &[u8], convert: fn([u8; N]) -> T) -> Vec<T> {
    bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            convert(raw)
        })
        .collect()
}
