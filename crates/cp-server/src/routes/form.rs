//! Embedded form page
//!
//! A single self-contained HTML page; dropdown contents come from
//! `/v1/options` so the markup never hardcodes catalog values. The theme is
//! injected at render time from configuration.

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;

/// GET /
pub async fn form_page(State(state): State<AppState>) -> Html<String> {
    let theme = state.config_manager.get().ui.theme;
    Html(render_form(&theme))
}

fn render_form(theme: &str) -> String {
    FORM_TEMPLATE.replace("{{theme}}", theme)
}

const FORM_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="{{theme}}">
<head>
<meta charset="utf-8">
<title>Used Car Price Estimator</title>
<style>
  :root { --bg: #fafafa; --fg: #1a1a1a; --card: #ffffff; --accent: #2563eb; }
  [data-theme="dark"] { --bg: #18181b; --fg: #e4e4e7; --card: #27272a; --accent: #60a5fa; }
  body { font-family: system-ui, sans-serif; background: var(--bg); color: var(--fg);
         max-width: 640px; margin: 2rem auto; padding: 0 1rem; }
  .card { background: var(--card); border-radius: 8px; padding: 1.5rem;
          box-shadow: 0 1px 3px rgba(0,0,0,.15); }
  label { display: block; margin-top: .75rem; font-size: .9rem; }
  select, input { width: 100%; padding: .4rem; margin-top: .2rem; box-sizing: border-box; }
  button { margin-top: 1.25rem; padding: .6rem 1.5rem; background: var(--accent);
           color: #fff; border: 0; border-radius: 6px; cursor: pointer; }
  #result { margin-top: 1rem; font-size: 1.2rem; }
  #result.error { color: #dc2626; }
</style>
</head>
<body>
<h1>Used Car Price Estimator</h1>
<div class="card">
  <form id="form">
    <label>Brand <select name="brand" data-cascade></select></label>
    <label>Model <select name="model" data-cascade></select></label>
    <label>Car Type <select name="car_type" data-cascade></select></label>
    <label>Color <select name="color" data-cascade></select></label>
    <label>Location <select name="location"></select></label>
    <label>Number of Owners <select name="number_of_owners"></select></label>
    <label>Fuel Type <select name="fuel_type"></select></label>
    <label>Transmission Type <select name="transmission_type"></select></label>
    <label>Previous Accidents <select name="previous_accidents"></select></label>
    <label>Service History <select name="service_history"></select></label>
    <label>Insurance Type <select name="insurance_type"></select></label>
    <label>Year <input name="year" type="number" min="2000" max="2024" value="2019"></label>
    <label>Odometer (km) <input name="odometer_km" type="number" min="5000" max="200000" value="45000"></label>
    <label>Engine Capacity (L) <input name="engine_capacity_l" type="number" min="1.0" max="5.0" step="0.1" value="2.0"></label>
    <button type="submit">Estimate Price</button>
  </form>
  <div id="result"></div>
</div>
<script>
const COLUMN_FOR = {
  location: "Location", brand: "Brand", model: "Model", car_type: "Car Type",
  color: "Color", number_of_owners: "Number of Owners", fuel_type: "Fuel Type",
  transmission_type: "Transmission Type", previous_accidents: "Previous Accidents",
  service_history: "Service History", insurance_type: "Insurance Type",
};
const form = document.getElementById("form");
const result = document.getElementById("result");

function cascadeParams() {
  const params = new URLSearchParams();
  for (const name of ["brand", "model", "car_type", "color"]) {
    const v = form.elements[name].value;
    if (v) params.set(name, v);
  }
  return params;
}

async function refreshOptions() {
  const resp = await fetch("/v1/options?" + cascadeParams());
  const body = await resp.json();
  for (const [name, column] of Object.entries(COLUMN_FOR)) {
    const select = form.elements[name];
    const current = select.value;
    const values = body.options[column] || [];
    select.innerHTML = "<option value=''>-- select --</option>" +
      values.map(v => `<option${v === current ? " selected" : ""}>${v}</option>`).join("");
  }
}

for (const select of form.querySelectorAll("select[data-cascade]")) {
  select.addEventListener("change", refreshOptions);
}

form.addEventListener("submit", async (e) => {
  e.preventDefault();
  result.className = "";
  result.textContent = "Estimating...";
  const payload = {};
  for (const name of Object.keys(COLUMN_FOR)) {
    const v = form.elements[name].value;
    if (v) payload[name] = v;
  }
  payload.year = Number(form.elements.year.value);
  payload.odometer_km = Number(form.elements.odometer_km.value);
  payload.engine_capacity_l = Number(form.elements.engine_capacity_l.value);

  const resp = await fetch("/v1/predict", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify(payload),
  });
  const body = await resp.json();
  if (resp.ok) {
    result.textContent = `Estimated price: ${Math.round(body.price).toLocaleString()} ${body.currency}`;
    if (body.warnings && body.warnings.length) {
      result.textContent += ` (${body.warnings.join("; ")})`;
    }
  } else {
    result.className = "error";
    result.textContent = body.error ? body.error.message : "Request failed";
  }
});

refreshOptions();
</script>
</body>
</html>
"#;
