//! Opaque array encode/decode matrix.

use channel_serialization::image::{
    deserialize_array_from_buffer, deserialize_array_from_string, serialize_array_to_buffer,
    serialize_array_to_string,
};
use channel_serialization::payload::deserialize_from_buffer;
use channel_serialization::{
    ChannelError, ChannelImage, Depth, HeaderInformation, OpaqueArray, OpaqueArrayMut, Result,
};

fn rgb_image() -> ChannelImage {
    let pixels: Vec<u8> = (0..4 * 3 * 3).map(|i| (i * 7) as u8).collect();
    ChannelImage::from_elements(4, 3, 3, &pixels).unwrap()
}

#[test]
fn roundtrip_rgb_buffer() {
    let image = rgb_image();
    let buffer = serialize_array_to_buffer(&image).unwrap();
    assert_eq!(buffer.len(), 16 + 36);
    let header = HeaderInformation::deserialize_from_buffer(&buffer, 0).unwrap();
    assert_eq!(header, HeaderInformation::new(4, 3, 0, 3));

    let mut decoded = ChannelImage::new();
    deserialize_array_from_buffer(&buffer, &mut decoded).unwrap();
    assert_eq!(decoded, image);
    assert_eq!(decoded.at::<u8>(1, 2, 0), image.at::<u8>(1, 2, 0));
}

#[test]
fn roundtrip_float_string() {
    let depth_map: Vec<f32> = (0..6).map(|i| i as f32 * 0.5).collect();
    let image = ChannelImage::from_elements(2, 3, 1, &depth_map).unwrap();

    let mut string = Vec::new();
    serialize_array_to_string(&image, &mut string).unwrap();

    let mut decoded = ChannelImage::zeros(10, 10, Depth::U8, 4).unwrap();
    deserialize_array_from_string(&string, &mut decoded).unwrap();
    assert_eq!(decoded.rows(), 2);
    assert_eq!(decoded.cols(), 3);
    assert_eq!(decoded.depth(), Depth::F32);
    assert_eq!(decoded.channels(), 1);
    assert_eq!(decoded.to_elements::<f32>().unwrap(), depth_map);
}

#[test]
fn image_payload_through_raw_path() {
    let image = ChannelImage::from_elements(1, 2, 2, &[1i16, -2, 3, -4]).unwrap();
    let buffer = serialize_array_to_buffer(&image).unwrap();
    let payload = deserialize_from_buffer::<i16>(&buffer).unwrap();
    assert_eq!(payload.header.channels, 2);
    assert_eq!(payload.to_vec::<i16>().unwrap(), vec![1, -2, 3, -4]);
}

#[test]
fn unknown_depth() {
    let mut buffer = serialize_array_to_buffer(&rgb_image()).unwrap().into_vec();
    buffer[8..12].copy_from_slice(&42u32.to_ne_bytes());
    let mut decoded = ChannelImage::new();
    let err = deserialize_array_from_buffer(&buffer, &mut decoded).unwrap_err();
    assert_eq!(err, ChannelError::UnknownDepth(42));
    assert!(err.is_contract_violation());
}

#[test]
fn truncated_image() {
    let buffer = serialize_array_to_buffer(&rgb_image()).unwrap();
    let mut decoded = ChannelImage::new();
    let err = deserialize_array_from_buffer(&buffer[..buffer.len() - 1], &mut decoded).unwrap_err();
    assert_eq!(
        err,
        ChannelError::TotalSize {
            expected: 52,
            actual: 51
        }
    );
    assert!(decoded.is_empty());
}

/// Array whose byte storage disagrees with its declared shape.
struct Mislabelled {
    data: Vec<u8>,
}

impl OpaqueArray for Mislabelled {
    fn rows(&self) -> usize {
        2
    }

    fn cols(&self) -> usize {
        2
    }

    fn depth(&self) -> Depth {
        Depth::U16
    }

    fn channels(&self) -> usize {
        1
    }

    fn bytes(&self) -> &[u8] {
        &self.data
    }
}

impl OpaqueArrayMut for Mislabelled {
    fn create(&mut self, _rows: usize, _cols: usize, _depth: Depth, _channels: usize) -> Result<()> {
        self.data.clear();
        Ok(())
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[test]
fn source_shape_checked() {
    let array = Mislabelled { data: vec![0; 6] };
    let err = serialize_array_to_buffer(&array).unwrap_err();
    assert_eq!(
        err,
        ChannelError::SourceLength {
            expected: 8,
            actual: 6
        }
    );

    let mut string = vec![1, 2, 3];
    assert!(serialize_array_to_string(&array, &mut string).is_err());
    assert!(string.is_empty());
}

#[test]
fn destination_that_ignores_create() {
    let buffer = serialize_array_to_buffer(&rgb_image()).unwrap();
    let mut array = Mislabelled { data: vec![0; 4] };
    assert_eq!(
        deserialize_array_from_buffer(&buffer, &mut array),
        Err(ChannelError::SourceLength {
            expected: 36,
            actual: 0
        })
    );
}
