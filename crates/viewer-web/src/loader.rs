use viewer_core::{LoadCompleter, ModelMesh, ViewerError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Fetch and decode the model in the background, completing `completer` once.
pub fn spawn_fetch(completer: LoadCompleter<ModelMesh>) {
    spawn_local(async move {
        let reference = completer.reference().to_string();
        log::info!("[load] fetching {}", reference);
        let result = fetch_bytes(&reference)
            .await
            .map_err(|e| ViewerError::asset_load(&reference, format!("{e:#}")))
            .and_then(|bytes| ModelMesh::decode_asset(&reference, &bytes));
        completer.complete(result);
    });
}

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp.dyn_into().map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} {}", resp.status(), resp.status_text());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}
