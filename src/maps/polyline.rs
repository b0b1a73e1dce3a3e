use crate::driver::geo::LatLng;

/// Decodes the encoded-polyline format the directions API uses for
/// `overview_polyline.points` (5 decimal places of precision).
pub fn decode(encoded: &str) -> Vec<LatLng> {
    let bytes = encoded.as_bytes();
    let mut path = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let (delta, next) = match decode_value(bytes, index) {
            Some(step) => step,
            None => break,
        };
        lat += delta;
        index = next;

        let (delta, next) = match decode_value(bytes, index) {
            Some(step) => step,
            None => break,
        };
        lng += delta;
        index = next;

        path.push(LatLng {
            lat: lat as f64 / 1e5,
            lng: lng as f64 / 1e5,
        });
    }

    path
}

fn decode_value(bytes: &[u8], mut index: usize) -> Option<(i64, usize)> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = (*bytes.get(index)? as i64) - 63;
        index += 1;
        result |= (byte & 0x1f) << shift;
        shift += 5;
        if byte < 0x20 {
            break;
        }
    }

    let value = if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    };
    Some((value, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_reference_polyline() {
        let path = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        assert_eq!(path.len(), 3);
        assert!((path[0].lat - 38.5).abs() < 1e-9);
        assert!((path[0].lng - -120.2).abs() < 1e-9);
        assert!((path[1].lat - 40.7).abs() < 1e-9);
        assert!((path[1].lng - -120.95).abs() < 1e-9);
        assert!((path[2].lat - 43.252).abs() < 1e-9);
        assert!((path[2].lng - -126.453).abs() < 1e-9);
    }

    #[test]
    fn empty_input_decodes_to_empty_path() {
        assert!(decode("").is_empty());
    }

    #[test]
    fn truncated_input_keeps_complete_points_only() {
        let full = decode("_p~iF~ps|U_ulLnnqC");
        assert_eq!(full.len(), 2);
        // drop the trailing longitude chunk mid-point
        let truncated = decode("_p~iF~ps|U_ulL");
        assert_eq!(truncated.len(), 1);
    }
}
