//! Test helpers for writing delivery requests to temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use courier_core::DeliveryRequest;
use tempfile::TempDir;

/// Write `contents` to `path`, creating or truncating the file.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Create a temporary directory and the request path inside it.
pub(super) fn request_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let request_path = root.join("request.json");
    (tmp, request_path)
}

/// A request over a few blocks of central Bangalore.
pub(super) fn city_request() -> DeliveryRequest {
    DeliveryRequest {
        hub_latitude: 12.9716,
        hub_longitude: 77.5946,
        restaurant1_latitude: 12.9750,
        restaurant1_longitude: 77.6050,
        restaurant1_prep_time: 0.5,
        restaurant2_latitude: 12.9352,
        restaurant2_longitude: 77.6245,
        restaurant2_prep_time: 0.25,
        customer1_latitude: 12.9900,
        customer1_longitude: 77.5700,
        customer2_latitude: 12.9279,
        customer2_longitude: 77.6271,
    }
}

/// A request whose hub lies beyond the north pole.
pub(super) fn out_of_range_request() -> DeliveryRequest {
    DeliveryRequest {
        hub_latitude: 95.0,
        ..city_request()
    }
}
