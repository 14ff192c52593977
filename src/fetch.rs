use anyhow::Result;
use parts_core::{parse_obj_bytes, MeshTree, ViewerError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let win = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_val = JsFuture::from(win.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp_val.dyn_into().map_err(js_err)?;

    if !resp.ok() {
        anyhow::bail!("HTTP {} {}", resp.status(), resp.status_text());
    }

    let buf_promise = resp.array_buffer().map_err(js_err)?;
    let buf_val = JsFuture::from(buf_promise).await.map_err(js_err)?;
    let array = js_sys::Uint8Array::new(&buf_val);
    let mut out = vec![0u8; array.length() as usize];
    array.copy_to(&mut out);
    Ok(out)
}

/// Fetch and parse one OBJ; every failure becomes a `LoadFailure` for `name`.
pub async fn load_mesh(name: &str, url: &str) -> Result<MeshTree, ViewerError> {
    let bytes = fetch_bytes(url)
        .await
        .map_err(|e| ViewerError::load_failure(name, e))?;
    let tree = parse_obj_bytes(&bytes).map_err(|e| ViewerError::load_failure(name, e))?;
    log::info!(
        "[load] {} ({} meshes, {} triangles)",
        url,
        tree.nodes.len(),
        tree.triangle_count()
    );
    Ok(tree)
}
