use base64::{prelude::BASE64_STANDARD, Engine};
use serde::{de, ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

use crate::{color::Rgba, image::PixelBuffer};

impl Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let spec = String::deserialize(deserializer)?;
        spec.parse().map_err(de::Error::custom)
    }
}

impl Serialize for PixelBuffer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PixelBuffer", 3)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.serialize_field("data", &BASE64_STANDARD.encode(self.to_rgba8()))?;
        state.end()
    }
}

#[derive(Deserialize)]
struct RawPixelBuffer {
    width: usize,
    height: usize,
    data: String,
}

impl<'de> Deserialize<'de> for PixelBuffer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawPixelBuffer::deserialize(deserializer)?;
        let bytes = BASE64_STANDARD
            .decode(raw.data)
            .map_err(de::Error::custom)?;
        if bytes.len() % 4 != 0 {
            return Err(de::Error::custom("pixel data is not a whole number of RGBA quadruples"));
        }

        let pixels = bytes
            .chunks_exact(4)
            .map(|rgba| Rgba::new(rgba[0], rgba[1], rgba[2], rgba[3]))
            .collect();
        PixelBuffer::from_pixels(raw.width, raw.height, pixels).map_err(de::Error::custom)
    }
}
