// CRC-8 over the raw payload bytes, appended to every frame.
// Polynomial: x^8 + x^2 + x + 1 (0x07), init 0x00 (CRC-8/SMBUS).

const CRC8_POLYNOMIAL: u8 = 0x07;

/// A frame checksum: pure function of the payload bytes, one byte out.
pub type ChecksumFn = fn(&[u8]) -> u8;

/// Default checksum, CRC-8/SMBUS.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0x00;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC8_POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vectors() {
        // CRC-8/SMBUS check value for "123456789"
        assert_eq!(crc8(b"123456789"), 0xF4);
        assert_eq!(crc8(&[]), 0x00);
        assert_eq!(crc8(&[0x00]), 0x00);
    }

    #[test]
    fn detects_single_byte_change() {
        let a = crc8(b"covert channel");
        let b = crc8(b"covert chanMel");
        assert_ne!(a, b);
    }

    #[test]
    fn is_pure() {
        let payload = b"same input, same checksum";
        assert_eq!(crc8(payload), crc8(payload));
    }
}
