use std::io::Read;
use std::vec::Vec;

use hoedown::Buffer;

#[test]
fn test_read_to_end() {
    let buffer = Buffer::from("This is a test");
    let mut destination = Vec::new();

    let mut slice: &[u8] = &buffer;
    slice.read_to_end(&mut destination).unwrap();

    assert_eq!(destination, b"This is a test");
}
