//! Reed–Solomon codec over GF(256) (§4.1).
//!
//! `encode(bytes) -> bytes` extends by exactly `nsym` parity bytes per RS
//! block and corrects up to `nsym/2` byte errors per block; `decode(bytes)
//! -> Some(data) | None`, never a best-guess partial decode.
//!
//! No crate in the corpus implements general (not erasure-only) RS byte
//! error correction — `reed-solomon-erasure` only recovers from *known*
//! missing shards, not unknown-location corruption — so this is a
//! from-scratch GF(256) implementation: table-driven field arithmetic,
//! systematic encoding by polynomial division, and syndrome decoding via
//! Berlekamp–Massey + Chien search + Forney's algorithm. A GF(256) field
//! caps a single codeword at 255 symbols, so payloads larger than
//! `255 - nsym` data bytes are striped across consecutive shortened RS
//! blocks (see `RsCodec`).

/// Primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11d), the standard
/// choice for GF(256) Reed–Solomon (also used by QR codes and CDs).
const PRIM_POLY: u16 = 0x11d;
const FIELD_SIZE: usize = 256;
const FIELD_ORDER: usize = 255; // multiplicative group order

struct GaloisField {
    exp: [u8; 512],
    log: [u8; FIELD_SIZE],
}

impl GaloisField {
    fn new() -> Self {
        let mut exp = [0u8; 512];
        let mut log = [0u8; FIELD_SIZE];
        let mut x: u16 = 1;
        for i in 0..FIELD_ORDER {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIM_POLY;
            }
        }
        for i in FIELD_ORDER..512 {
            exp[i] = exp[i - FIELD_ORDER];
        }
        Self { exp, log }
    }

    #[inline]
    fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            0
        } else {
            self.exp[self.log[a as usize] as usize + self.log[b as usize] as usize]
        }
    }

    #[inline]
    fn div(&self, a: u8, b: u8) -> u8 {
        debug_assert!(b != 0, "division by zero in GF(256)");
        if a == 0 {
            0
        } else {
            let i = FIELD_ORDER + self.log[a as usize] as usize - self.log[b as usize] as usize;
            self.exp[i]
        }
    }

    #[inline]
    fn pow(&self, a: u8, power: i32) -> u8 {
        if a == 0 {
            return 0;
        }
        let l = self.log[a as usize] as i32;
        let e = (((l * power) % FIELD_ORDER as i32) + FIELD_ORDER as i32) % FIELD_ORDER as i32;
        self.exp[e as usize]
    }

    #[inline]
    fn inverse(&self, a: u8) -> u8 {
        debug_assert!(a != 0, "zero has no inverse in GF(256)");
        self.exp[FIELD_ORDER - self.log[a as usize] as usize]
    }

    /// Evaluate `p(x)` at `x`, where `p[0]` is the highest-degree
    /// coefficient (systematic-message convention).
    fn poly_eval(&self, p: &[u8], x: u8) -> u8 {
        let mut y = p[0];
        for &coef in &p[1..] {
            y = self.mul(y, x) ^ coef;
        }
        y
    }

    /// `p * q`, both in highest-degree-first order.
    fn poly_mul(&self, p: &[u8], q: &[u8]) -> Vec<u8> {
        let mut r = vec![0u8; p.len() + q.len() - 1];
        for (j, &qj) in q.iter().enumerate() {
            if qj == 0 {
                continue;
            }
            for (i, &pi) in p.iter().enumerate() {
                if pi != 0 {
                    r[i + j] ^= self.mul(pi, qj);
                }
            }
        }
        r
    }

    fn generator_poly(&self, nsym: usize) -> Vec<u8> {
        let mut g = vec![1u8];
        for i in 0..nsym {
            g = self.poly_mul(&g, &[1, self.pow(2, i as i32)]);
        }
        g
    }
}

thread_local! {
    static GF: GaloisField = GaloisField::new();
}

fn with_gf<R>(f: impl FnOnce(&GaloisField) -> R) -> R {
    GF.with(f)
}

/// A fixed-parity RS codec, optionally striping long payloads across
/// multiple shortened blocks of at most `255 - nsym` data bytes.
#[derive(Debug, Clone, Copy)]
pub struct RsCodec {
    nsym: usize,
}

impl RsCodec {
    pub fn new(nsym: u16) -> Self {
        Self { nsym: nsym as usize }
    }

    fn max_data_per_block(&self) -> usize {
        FIELD_SIZE - 1 - self.nsym
    }

    /// Block boundaries `(start, len)` over a payload of `data_len` bytes.
    /// Pure function of `(data_len, nsym)` — decoder and encoder compute
    /// the identical layout without any extra framing.
    fn block_layout(&self, data_len: usize) -> Vec<(usize, usize)> {
        let k_max = self.max_data_per_block();
        if data_len == 0 {
            return vec![(0, 0)];
        }
        let mut blocks = Vec::new();
        let mut offset = 0;
        while offset < data_len {
            let len = k_max.min(data_len - offset);
            blocks.push((offset, len));
            offset += len;
        }
        blocks
    }

    /// Total encoded length for a payload of `data_len` bytes under this
    /// codec's `nsym`. Used by the decoder to compute the exact codeword
    /// boundary (§3 invariant 2) without guessing.
    pub fn encoded_len(&self, data_len: usize) -> usize {
        let blocks = self.block_layout(data_len);
        data_len + blocks.len() * self.nsym
    }

    /// `encode(bytes) -> bytes`, extending by `nsym` parity bytes per
    /// block.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        with_gf(|gf| {
            let gen = gf.generator_poly(self.nsym);
            let mut out = Vec::with_capacity(self.encoded_len(data.len()));
            for (start, len) in self.block_layout(data.len()) {
                let block = &data[start..start + len];
                out.extend_from_slice(block);
                out.extend_from_slice(&rs_encode_block(gf, &gen, block, self.nsym));
            }
            out
        })
    }

    /// Strips parity from each block without attempting correction —
    /// the "uncorrected raw slice" a caller falls back to when it chooses
    /// not to treat an RS failure as fatal (§4.6 step 4). Block-layout
    /// aware, unlike a bare `coded[..data_len]` slice, which would be
    /// wrong whenever a payload spans more than one striped block.
    pub fn strip_parity(&self, coded: &[u8], data_len: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(data_len);
        let mut cursor = 0usize;
        for (_, len) in self.block_layout(data_len) {
            let block_total = len + self.nsym;
            let end = (cursor + len).min(coded.len());
            let start = cursor.min(coded.len());
            out.extend_from_slice(&coded[start..end]);
            out.resize(out.len() + (len - (end - start)), 0);
            cursor += block_total;
        }
        out
    }

    /// `decode(bytes) -> Some(data) | None`. Never returns a best-guess
    /// partial decode: any block that cannot be corrected fails the whole
    /// call.
    pub fn decode(&self, coded: &[u8], data_len: usize) -> Option<Vec<u8>> {
        with_gf(|gf| {
            let mut out = Vec::with_capacity(data_len);
            let mut cursor = 0usize;
            for (_, len) in self.block_layout(data_len) {
                let block_total = len + self.nsym;
                if cursor + block_total > coded.len() {
                    return None;
                }
                let block = &coded[cursor..cursor + block_total];
                cursor += block_total;
                let corrected = rs_decode_block(gf, block, self.nsym)?;
                out.extend_from_slice(&corrected[..len]);
            }
            Some(out)
        })
    }
}

/// Systematic encode of one shortened RS block: `data` (<= 255 - nsym
/// bytes) plus exactly `nsym` parity bytes, via synthetic polynomial
/// division by the generator.
fn rs_encode_block(gf: &GaloisField, gen: &[u8], data: &[u8], nsym: usize) -> Vec<u8> {
    let mut buf = vec![0u8; data.len() + nsym];
    buf[..data.len()].copy_from_slice(data);
    for i in 0..data.len() {
        let coef = buf[i];
        if coef != 0 {
            for (j, &g) in gen.iter().enumerate().skip(1) {
                buf[i + j] ^= gf.mul(g, coef);
            }
        }
    }
    buf[data.len()..].to_vec()
}

/// Decode one RS block (`data || parity`, highest-degree-first), returning
/// the corrected full block (data followed by corrected parity) or `None`
/// if more than `nsym/2` symbols are in error.
fn rs_decode_block(gf: &GaloisField, block: &[u8], nsym: usize) -> Option<Vec<u8>> {
    let n = block.len();
    let synd: Vec<u8> = (0..nsym).map(|i| gf.poly_eval(block, gf.pow(2, i as i32))).collect();
    if synd.iter().all(|&s| s == 0) {
        return Some(block.to_vec());
    }

    let sigma = berlekamp_massey(gf, &synd)?;
    let degree = sigma.len() - 1;
    if degree * 2 > nsym {
        return None;
    }

    // Chien search: position p is in error iff sigma(alpha^{-(n-1-p)}) == 0.
    let mut err_positions = Vec::with_capacity(degree);
    let mut err_locators = Vec::with_capacity(degree);
    for p in 0..n {
        let exponent = (n as i32) - 1 - (p as i32);
        let x_candidate = gf.pow(2, exponent);
        let z = gf.inverse(x_candidate);
        if poly_eval_ascending(gf, &sigma, z) == 0 {
            err_positions.push(p);
            err_locators.push(x_candidate);
        }
    }
    if err_positions.len() != degree {
        return None; // sigma has roots outside the codeword: uncorrectable
    }

    // Omega(x) = (S(x) * sigma(x)) mod x^nsym, both ascending-order.
    let omega = poly_mul_ascending_truncated(gf, &synd, &sigma, nsym);
    // Formal derivative in characteristic 2: only odd-degree terms survive.
    let mut corrected = block.to_vec();
    for (&p, &x_l) in err_positions.iter().zip(err_locators.iter()) {
        let z = gf.inverse(x_l);
        let omega_z = poly_eval_ascending(gf, &omega, z);
        let sigma_deriv_z = odd_term_derivative(gf, &sigma, z);
        if sigma_deriv_z == 0 {
            return None;
        }
        let magnitude = gf.div(gf.mul(x_l, omega_z), sigma_deriv_z);
        corrected[p] ^= magnitude;
    }

    // Verify: corrected codeword must have all-zero syndromes.
    let check: Vec<u8> =
        (0..nsym).map(|i| gf.poly_eval(&corrected, gf.pow(2, i as i32))).collect();
    if check.iter().any(|&s| s != 0) {
        return None;
    }
    Some(corrected)
}

/// Berlekamp–Massey over `synd` (ascending index = time step), producing
/// the error locator polynomial in ascending-degree order (`sigma[0] ==
/// 1`). Returns `None` if the recurrence never terminates usefully (should
/// not happen for well-formed syndromes).
fn berlekamp_massey(gf: &GaloisField, synd: &[u8]) -> Option<Vec<u8>> {
    let n = synd.len();
    let mut c = vec![1u8]; // current connection polynomial, ascending
    let mut b = vec![1u8];
    let mut l = 0usize;
    let mut m = 1usize;
    let mut last_discrepancy = 1u8;

    for i in 0..n {
        let mut delta = synd[i];
        for (j, &cj) in c.iter().enumerate().skip(1) {
            if j <= i {
                delta ^= gf.mul(cj, synd[i - j]);
            }
        }
        if delta == 0 {
            m += 1;
        } else if 2 * l <= i {
            let t = c.clone();
            let coef = gf.div(delta, last_discrepancy);
            c = poly_add_ascending(&c, &poly_scale_shift(gf, &b, coef, m));
            l = i + 1 - l;
            b = t;
            last_discrepancy = delta;
            m = 1;
        } else {
            let coef = gf.div(delta, last_discrepancy);
            c = poly_add_ascending(&c, &poly_scale_shift(gf, &b, coef, m));
            m += 1;
        }
    }
    Some(c)
}

fn poly_scale_shift(gf: &GaloisField, p: &[u8], scalar: u8, shift: usize) -> Vec<u8> {
    let mut out = vec![0u8; p.len() + shift];
    for (i, &c) in p.iter().enumerate() {
        out[i + shift] = gf.mul(c, scalar);
    }
    out
}

fn poly_add_ascending(a: &[u8], b: &[u8]) -> Vec<u8> {
    let len = a.len().max(b.len());
    let mut out = vec![0u8; len];
    for (i, &c) in a.iter().enumerate() {
        out[i] ^= c;
    }
    for (i, &c) in b.iter().enumerate() {
        out[i] ^= c;
    }
    out
}

fn poly_eval_ascending(gf: &GaloisField, p: &[u8], x: u8) -> u8 {
    let mut y = 0u8;
    let mut xp = 1u8; // x^0
    for &coef in p {
        if coef != 0 {
            y ^= gf.mul(coef, xp);
        }
        xp = if xp == 0 { 0 } else { gf.mul(xp, x) };
        if x == 0 {
            xp = 0;
        }
    }
    y
}

fn poly_mul_ascending_truncated(gf: &GaloisField, a: &[u8], b: &[u8], max_len: usize) -> Vec<u8> {
    let len = (a.len() + b.len() - 1).min(max_len);
    let mut out = vec![0u8; len];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0 || i >= len {
            continue;
        }
        for (j, &bj) in b.iter().enumerate() {
            if i + j >= len {
                break;
            }
            if bj != 0 {
                out[i + j] ^= gf.mul(ai, bj);
            }
        }
    }
    out
}

/// `sigma'(z)` in characteristic 2: even-degree terms vanish, so
/// `sigma'(x) = sigma_1 + sigma_3 x^2 + sigma_5 x^4 + ...`.
fn odd_term_derivative(gf: &GaloisField, sigma: &[u8], z: u8) -> u8 {
    let mut y = 0u8;
    let mut zp = 1u8; // z^0, tracks z^(l-1) for odd l as l steps by 2
    let mut l = 1usize;
    while l < sigma.len() {
        let coef = sigma[l];
        if coef != 0 {
            y ^= gf.mul(coef, zp);
        }
        zp = gf.mul(zp, z);
        zp = gf.mul(zp, z);
        l += 2;
    }
    y
}
