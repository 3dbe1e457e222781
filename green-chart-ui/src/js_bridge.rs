//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! D3.js chart functions are split across `assets/js/*.js` and loaded at runtime.
//! They are evaluated as globals (no ES modules) and exposed via `window.*`.
//! This module serializes chart descriptions and calls those globals.

use green_chart::chart::ChartKind;

// Embed all D3 chart JS files at compile time
static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static FACETS_JS: &str = include_str!("../assets/js/facets.js");
static DISTRIBUTION_CHART_JS: &str = include_str!("../assets/js/distribution-chart.js");
static ORDINAL_CHART_JS: &str = include_str!("../assets/js/ordinal-chart.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Greenness JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote `s` as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "''".to_string())
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The scripts are stored on `window` and evaluated at global scope once D3
/// is available, then each renderer is promoted to `window.*` explicitly.
/// Calling this more than once is harmless.
pub fn init_charts() {
    let all_js = [TOOLTIP_JS, FACETS_JS, DISTRIBUTION_CHART_JS, ORDINAL_CHART_JS].join("\n");

    let store_js = format!(
        "if (!window.__greenChartsReady) {{ window.__greenChartScripts = {}; }}",
        js_string(&all_js)
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__greenChartsReady || window.__greenChartsPolling) return;
            window.__greenChartsPolling = true;
            var waitForD3 = setInterval(function() {
                if (typeof d3 !== 'undefined') {
                    clearInterval(waitForD3);
                    (0, eval)(window.__greenChartScripts);
                    delete window.__greenChartScripts;
                    if (typeof renderDistributionChart !== 'undefined') window.renderDistributionChart = renderDistributionChart;
                    if (typeof renderOrdinalChart !== 'undefined') window.renderOrdinalChart = renderOrdinalChart;
                    if (typeof initTooltip !== 'undefined') window.initTooltip = initTooltip;
                    if (typeof showTooltip !== 'undefined') window.showTooltip = showTooltip;
                    if (typeof hideTooltip !== 'undefined') window.hideTooltip = hideTooltip;
                    window.__greenChartsReady = true;
                    console.log('Greenness charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Render a chart description into the container with `container_id`.
///
/// Polls until D3.js is loaded, the chart scripts are initialized and the
/// container exists. A newer render for the same container cancels any
/// render still waiting, so only the latest chart is ever drawn.
pub fn render_chart(container_id: &str, kind: ChartKind, chart_json: &str) {
    let renderer = match kind {
        ChartKind::Density => "renderDistributionChart",
        ChartKind::Scatter => "renderOrdinalChart",
    };
    let id = js_string(container_id);
    let data = js_string(chart_json);
    call_js(&format!(
        r#"
        (function() {{
            window.__greenPending = window.__greenPending || {{}};
            if (window.__greenPending[{id}]) clearInterval(window.__greenPending[{id}]);
            var poll = setInterval(function() {{
                if (window.__greenChartsReady &&
                    typeof window.{renderer} !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    delete window.__greenPending[{id}];
                    try {{
                        window.{renderer}({id}, {data});
                    }} catch(e) {{ console.error('[Greenness] {renderer} error:', e); }}
                }}
            }}, 100);
            window.__greenPending[{id}] = poll;
        }})();
        "#,
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "window.__greenPending && window.__greenPending[{id}] && clearInterval(window.__greenPending[{id}]);",
        id = js_string(container_id)
    ));
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(container_id));
    if let Some(element) = element {
        element.set_inner_html("");
    }
}
