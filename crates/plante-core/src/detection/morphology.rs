use ndarray::{Array2, ArrayView1, ArrayViewMut1};

/// Binary dilation with a `size` x `size` square structuring element.
///
/// The element is anchored at (`size / 2`, `size / 2`), so for even sizes the
/// foreground grows one pixel further down/right than up/left. A square is separable,
/// so this runs as a horizontal pass followed by a vertical pass, each using a
/// running count of set pixels. Out-of-bounds pixels count as background.
pub fn dilate_square(mask: &Array2<bool>, size: usize) -> Array2<bool> {
    if size <= 1 || mask.is_empty() {
        return mask.clone();
    }
    let anchor = size / 2;

    let mut horizontal = Array2::from_elem(mask.dim(), false);
    for (src, dst) in mask.rows().into_iter().zip(horizontal.rows_mut()) {
        dilate_line(src, dst, size, anchor);
    }

    let mut result = Array2::from_elem(mask.dim(), false);
    for (src, dst) in horizontal.columns().into_iter().zip(result.columns_mut()) {
        dilate_line(src, dst, size, anchor);
    }

    result
}

/// One-dimensional dilation: `dst[i]` is set if any of
/// `src[i - anchor ..= i + size - 1 - anchor]` is set.
fn dilate_line(src: ArrayView1<bool>, mut dst: ArrayViewMut1<bool>, size: usize, anchor: usize) {
    let n = src.len();
    let mut prefix = vec![0usize; n + 1];
    for (i, &v) in src.iter().enumerate() {
        prefix[i + 1] = prefix[i] + usize::from(v);
    }

    for i in 0..n {
        let lo = i.saturating_sub(anchor);
        let hi = (i + size - anchor).min(n);
        dst[i] = prefix[hi] > prefix[lo];
    }
}
