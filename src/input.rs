use glam::Vec2;
use smallvec::SmallVec;
use web_sys as web;

#[inline]
pub fn mouse_client(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Client positions of the active touches (at most two are kept).
pub fn touch_points(ev: &web::TouchEvent) -> SmallVec<[Vec2; 2]> {
    let touches = ev.touches();
    (0..touches.length().min(2))
        .filter_map(|i| touches.get(i))
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        .collect()
}
