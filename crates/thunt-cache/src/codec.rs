//! Binary encode/decode for artifacts.
//!
//! All integers are little-endian. The payload is length-prefixed and
//! followed by its FNV-1a checksum, so a truncated or partially
//! overwritten artifact never decodes. Every length is checked against the
//! declared payload size before anything is allocated.

use std::io::{Read, Write};

use thunt_model::{CsrMatrix, DenseTable};

use crate::artifact::{Artifact, ArtifactKind};
use crate::error::CacheError;
use crate::hash::fnv1a;
use crate::{FORMAT_VERSION, MAGIC};

// ── Primitive writers ───────────────────────────────────────────

fn put_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, CacheError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, CacheError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn malformed(detail: impl Into<String>) -> CacheError {
    CacheError::Malformed {
        detail: detail.into(),
    }
}

fn to_usize(v: u64, what: &str) -> Result<usize, CacheError> {
    usize::try_from(v).map_err(|_| malformed(format!("{what} {v} does not fit usize")))
}

/// Splits fixed-width little-endian words off a payload slice.
struct Cursor<'a> {
    bytes: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], CacheError> {
        if self.bytes.len() < n {
            return Err(malformed("payload ends early"));
        }
        let (head, tail) = self.bytes.split_at(n);
        self.bytes = tail;
        Ok(head)
    }

    fn u64(&mut self) -> Result<u64, CacheError> {
        let mut word = [0u8; 8];
        word.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(word))
    }

    fn words<T, const N: usize>(
        &mut self,
        n: usize,
        decode: impl Fn([u8; N]) -> T,
    ) -> Result<Vec<T>, CacheError> {
        let len = n
            .checked_mul(N)
            .ok_or_else(|| malformed("entry count overflows"))?;
        Ok(self
            .take(len)?
            .chunks_exact(N)
            .map(|c| {
                let mut word = [0u8; N];
                word.copy_from_slice(c);
                decode(word)
            })
            .collect())
    }
}

// ── Payload encode/decode ───────────────────────────────────────

fn encode_payload(artifact: &Artifact) -> Vec<u8> {
    let mut buf = Vec::new();
    match artifact {
        Artifact::Table(t) => {
            buf.reserve(t.data().len() * 4);
            for &v in t.data() {
                buf.extend_from_slice(&v.to_le_bytes());
            }
        }
        Artifact::Transition(m) => {
            encode_csr_structure(&mut buf, m.indptr(), m.indices());
            for &v in m.values() {
                buf.extend_from_slice(&v.to_le_bytes());
            }
        }
        Artifact::Mask(m) => {
            encode_csr_structure(&mut buf, m.indptr(), m.indices());
            buf.extend_from_slice(m.values());
        }
    }
    buf
}

fn encode_csr_structure(buf: &mut Vec<u8>, indptr: &[usize], indices: &[u32]) {
    put_u64(buf, indices.len() as u64);
    for &p in indptr {
        put_u64(buf, p as u64);
    }
    for &c in indices {
        put_u32(buf, c);
    }
}

fn decode_payload(
    kind: ArtifactKind,
    rows: usize,
    cols: usize,
    payload: &[u8],
) -> Result<Artifact, CacheError> {
    let mut cur = Cursor { bytes: payload };
    let artifact = match kind {
        ArtifactKind::Table => {
            let n = rows
                .checked_mul(cols)
                .ok_or_else(|| malformed("table size overflows"))?;
            let data = cur.words(n, i32::from_le_bytes)?;
            let table = DenseTable::new(rows, cols, data)
                .map_err(|e| malformed(e.to_string()))?;
            Artifact::Table(table)
        }
        ArtifactKind::Transition => {
            let (indptr, indices) = decode_csr_structure(&mut cur, rows)?;
            let values = cur.words(indices.len(), f64::from_le_bytes)?;
            let m = CsrMatrix::from_raw_parts(rows, cols, indptr, indices, values)
                .map_err(|e| malformed(e.to_string()))?;
            Artifact::Transition(m)
        }
        ArtifactKind::Mask => {
            let (indptr, indices) = decode_csr_structure(&mut cur, rows)?;
            let values = cur.take(indices.len())?.to_vec();
            let m = CsrMatrix::from_raw_parts(rows, cols, indptr, indices, values)
                .map_err(|e| malformed(e.to_string()))?;
            Artifact::Mask(m)
        }
    };
    if !cur.bytes.is_empty() {
        return Err(malformed(format!(
            "{} unused payload bytes",
            cur.bytes.len()
        )));
    }
    Ok(artifact)
}

fn decode_csr_structure(
    cur: &mut Cursor<'_>,
    rows: usize,
) -> Result<(Vec<usize>, Vec<u32>), CacheError> {
    let nnz = to_usize(cur.u64()?, "entry count")?;
    let ptr_len = rows
        .checked_add(1)
        .ok_or_else(|| malformed("row count overflows"))?;
    let indptr = cur
        .words(ptr_len, u64::from_le_bytes)?
        .into_iter()
        .map(|p| to_usize(p, "row pointer"))
        .collect::<Result<Vec<_>, _>>()?;
    let indices = cur.words(nnz, u32::from_le_bytes)?;
    Ok((indptr, indices))
}

// ── Artifact encode/decode ──────────────────────────────────────

/// Encode one artifact (header, payload, checksum).
pub fn encode(w: &mut dyn Write, artifact: &Artifact) -> Result<(), CacheError> {
    let payload = encode_payload(artifact);
    let (rows, cols) = artifact.shape();
    let mut header = Vec::with_capacity(4 + 2 + 3 * 8);
    header.extend_from_slice(&MAGIC);
    header.push(FORMAT_VERSION);
    header.push(artifact.kind().tag());
    put_u64(&mut header, rows as u64);
    put_u64(&mut header, cols as u64);
    put_u64(&mut header, payload.len() as u64);
    w.write_all(&header)?;
    w.write_all(&payload)?;
    w.write_all(&fnv1a(&payload).to_le_bytes())?;
    Ok(())
}

/// Encode one artifact into a fresh buffer.
pub fn encode_to_vec(artifact: &Artifact) -> Vec<u8> {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = encode(&mut buf, artifact);
    buf
}

/// Decode one artifact, consuming the whole reader.
///
/// Fails on bad magic, unknown version or kind, a checksum mismatch, a
/// payload inconsistent with the declared shape, or trailing bytes.
pub fn decode(r: &mut dyn Read) -> Result<Artifact, CacheError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(CacheError::InvalidMagic);
    }
    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(CacheError::UnsupportedVersion { found: version });
    }
    let tag = read_u8(r)?;
    let kind =
        ArtifactKind::from_tag(tag).ok_or_else(|| malformed(format!("unknown kind tag {tag}")))?;
    let rows = to_usize(read_u64_le(r)?, "row count")?;
    let cols = to_usize(read_u64_le(r)?, "column count")?;
    let len = read_u64_le(r)?;

    let mut payload = Vec::new();
    Read::take(&mut *r, len).read_to_end(&mut payload)?;
    if payload.len() as u64 != len {
        return Err(malformed(format!(
            "payload truncated: {} of {len} bytes",
            payload.len()
        )));
    }
    let stored = read_u64_le(r)?;
    let computed = fnv1a(&payload);
    if stored != computed {
        return Err(CacheError::ChecksumMismatch { stored, computed });
    }
    let mut trailing = [0u8; 1];
    if r.read(&mut trailing)? != 0 {
        return Err(malformed("trailing bytes after checksum"));
    }
    decode_payload(kind, rows, cols, &payload)
}

/// Decode one artifact from a byte slice.
pub fn decode_from_slice(mut bytes: &[u8]) -> Result<Artifact, CacheError> {
    decode(&mut bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thunt_core::{Action, ReducedAction, TaskParams};
    use thunt_model::{build_omega, build_phi, StateSet};

    fn small() -> StateSet {
        StateSet::enumerate(&TaskParams::new(2, 1).unwrap())
    }

    #[test]
    fn transition_roundtrip_is_bit_identical() {
        let phi = build_phi(&small(), Action::East).unwrap();
        let artifact = Artifact::Transition(phi);
        let bytes = encode_to_vec(&artifact);
        let back = decode_from_slice(&bytes).unwrap();
        assert_eq!(back, artifact);
        assert_eq!(encode_to_vec(&back), bytes);
    }

    #[test]
    fn mask_and_table_roundtrip() {
        let states = small();
        for artifact in [
            Artifact::Mask(build_omega(&states, ReducedAction::Step).unwrap()),
            Artifact::Table(DenseTable::from_states(&states)),
            Artifact::Table(DenseTable::actions(2)),
        ] {
            let back = decode_from_slice(&encode_to_vec(&artifact)).unwrap();
            assert_eq!(back, artifact);
            assert_eq!(back.kind(), artifact.kind());
        }
    }

    #[test]
    fn header_layout() {
        let bytes = encode_to_vec(&Artifact::Table(DenseTable::observations()));
        assert_eq!(&bytes[..4], b"THNT");
        assert_eq!(bytes[4], FORMAT_VERSION);
        assert_eq!(bytes[5], ArtifactKind::Table.tag());
        assert_eq!(bytes.len(), 6 + 24 + 40 + 8);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = encode_to_vec(&Artifact::Table(DenseTable::observations()));
        bytes[0] = b'X';
        assert!(matches!(
            decode_from_slice(&bytes),
            Err(CacheError::InvalidMagic)
        ));
    }

    #[test]
    fn rejects_future_version() {
        let mut bytes = encode_to_vec(&Artifact::Table(DenseTable::observations()));
        bytes[4] = FORMAT_VERSION + 1;
        assert!(matches!(
            decode_from_slice(&bytes),
            Err(CacheError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_flipped_payload_byte() {
        let mut bytes = encode_to_vec(&Artifact::Table(DenseTable::actions(3)));
        bytes[32] ^= 0x01;
        assert!(matches!(
            decode_from_slice(&bytes),
            Err(CacheError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn every_truncation_fails() {
        let phi = build_phi(&small(), Action::South).unwrap();
        let bytes = encode_to_vec(&Artifact::Transition(phi));
        for cut in 0..bytes.len() {
            assert!(decode_from_slice(&bytes[..cut]).is_err(), "cut at {cut}");
        }
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = encode_to_vec(&Artifact::Table(DenseTable::observations()));
        bytes.push(0);
        assert!(matches!(
            decode_from_slice(&bytes),
            Err(CacheError::Malformed { .. })
        ));
    }

    #[test]
    fn huge_declared_length_does_not_allocate() {
        let mut bytes = encode_to_vec(&Artifact::Table(DenseTable::observations()));
        bytes[22..30].copy_from_slice(&u64::MAX.to_le_bytes());
        assert!(decode_from_slice(&bytes).is_err());
    }
}
