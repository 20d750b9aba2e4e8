//! Aspect ratios and iris centroid

use landmarks::FaceLandmarks;

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Eye aspect ratio over a 6-point contour.
///
/// `eye` follows the topology ordering: vertical distances are taken between
/// points 1-5 and 2-4, the horizontal span between 0-3. Returns 0.0 when the
/// horizontal span collapses.
pub fn aspect_ratio(face: &FaceLandmarks, eye: &[usize; 6], width: u32, height: u32) -> f32 {
    let p = |i: usize| face.point(eye[i]).to_pixels(width, height);

    let vertical = distance(p(1), p(5)) + distance(p(2), p(4));
    let horizontal = distance(p(0), p(3));

    if horizontal > 0.0 {
        vertical / (2.0 * horizontal)
    } else {
        0.0
    }
}

/// Mouth aspect ratio: inner-lip opening over mouth width.
///
/// Returns 0.0 when the mouth width collapses.
pub fn mouth_aspect_ratio(face: &FaceLandmarks, width: u32, height: u32) -> f32 {
    let mouth = landmarks::topology::MOUTH;
    let p = |i: usize| face.point(mouth[i]).to_pixels(width, height);

    let vertical = distance(p(0), p(1));
    let horizontal = distance(p(2), p(3));

    if horizontal > 0.0 {
        vertical / horizontal
    } else {
        0.0
    }
}

/// Centroid of one iris ring, in pixel coordinates.
pub fn iris_center(face: &FaceLandmarks, ring: &[usize; 4], width: u32, height: u32) -> (f32, f32) {
    let mut cx = 0.0;
    let mut cy = 0.0;
    for &idx in ring {
        let (x, y) = face.point(idx).to_pixels(width, height);
        cx += x;
        cy += y;
    }
    (cx / ring.len() as f32, cy / ring.len() as f32)
}
