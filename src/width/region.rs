use crate::cumulant::CumulantField;
use crate::field::Field2;
use crate::numeric::sign;

const NEIGH_OFFSETS: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Keep the 4-connected region around the zero lag whose cells share the
/// sign of `C(0,0)`; every other cell becomes zero.
pub fn extract_sign_coherent_center(field: &CumulantField) -> CumulantField {
    let values = field.values();
    let (w, h) = values.shape();
    let (cx, cy) = field.center_index();
    let seed_sign = sign(values.get(cx, cy));

    let mut out = Field2::new(w, h);
    if seed_sign.is_nan() {
        return field.with_values(out);
    }

    let mut used = vec![false; w * h];
    let seed = values.idx(cx, cy);
    used[seed] = true;
    let mut stack = vec![seed];
    while let Some(idx) = stack.pop() {
        out.data[idx] = values.data[idx];
        let x = idx % w;
        let y = idx / w;
        for (dx, dy) in NEIGH_OFFSETS {
            let xn = x as isize + dx;
            let yn = y as isize + dy;
            if xn < 0 || yn < 0 || xn >= w as isize || yn >= h as isize {
                continue;
            }
            let neighbor_idx = yn as usize * w + xn as usize;
            if used[neighbor_idx] {
                continue;
            }
            if sign(values.data[neighbor_idx]) == seed_sign {
                used[neighbor_idx] = true;
                stack.push(neighbor_idx);
            }
        }
    }
    field.with_values(out)
}
