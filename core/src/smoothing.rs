/// Robust 3-point median filter for an elevation profile.
/// Endpoints use themselves as the missing neighbour so the length is kept.
pub fn smooth_elevation(elevations: &[f64]) -> Vec<f64> {
    if elevations.is_empty() {
        return Vec::new();
    }
    let n = elevations.len();
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let a0 = if i > 0 { elevations[i - 1] } else { elevations[i] };
        let a1 = elevations[i];
        let a2 = if i + 1 < n { elevations[i + 1] } else { elevations[i] };

        let mut win = [a0, a1, a2];
        win.sort_by(|x, y| x.total_cmp(y));
        out.push(win[1]); // median
    }

    out
}
