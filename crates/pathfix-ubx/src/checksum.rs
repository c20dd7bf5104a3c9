/// Two-accumulator checksum over `bytes`.
///
/// `A` is the running byte sum and `B` the running sum of `A`, both mod 256.
/// For a message the input is class, id, both length bytes and the payload.
pub fn checksum(bytes: &[u8]) -> [u8; 2] {
    let (ck_a, ck_b) = bytes.iter().fold((0u8, 0u8), |(a, b), &byte| {
        let a = a.wrapping_add(byte);
        (a, b.wrapping_add(a))
    });
    [ck_a, ck_b]
}
