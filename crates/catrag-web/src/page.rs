use catrag_core::Category;

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Category-Specific RAG Chatbot</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
  label { display: block; margin: 1rem 0 0.3rem; font-weight: 600; }
  select, input { width: 100%; padding: 0.5rem; font-size: 1rem; box-sizing: border-box; }
  #busy { margin-top: 1rem; color: #555; }
  #answer { margin-top: 1rem; white-space: pre-wrap; }
  .error { color: #b00020; }
</style>
</head>
<body>
<h1>📂 Category-Specific RAG Chatbot</h1>
<form id="ask">
  <label for="category">Select Category</label>
  <select id="category" name="category">{options}</select>
  <label for="question">Ask your question:</label>
  <input id="question" name="question" autocomplete="off">
</form>
<div id="busy" hidden></div>
<div id="answer"></div>
<script>
const form = document.getElementById("ask");
const busy = document.getElementById("busy");
const out = document.getElementById("answer");
form.addEventListener("submit", async (ev) => {
  ev.preventDefault();
  const category = document.getElementById("category").value;
  const question = document.getElementById("question").value.trim();
  if (!question) return;
  const select = document.getElementById("category");
  busy.textContent = "Searching in " + select.options[select.selectedIndex].text + " knowledge base...";
  busy.hidden = false;
  out.textContent = "";
  out.className = "";
  try {
    const resp = await fetch("/api/query", {
      method: "POST",
      headers: { "content-type": "application/json" },
      body: JSON.stringify({ category, question }),
    });
    const body = await resp.json();
    if (resp.ok) {
      const label = document.createElement("strong");
      label.textContent = "Answer: ";
      out.append(label, body.answer);
    } else {
      out.className = "error";
      out.textContent = body.error || ("request failed: " + resp.status);
    }
  } catch (err) {
    out.className = "error";
    out.textContent = String(err);
  } finally {
    busy.hidden = true;
  }
});
</script>
</body>
</html>
"#;

/// The question page, with one `<option>` per category.
pub(crate) fn index_page() -> String {
    let options: String = Category::ALL
        .iter()
        .map(|c| format!(r#"<option value="{}">{}</option>"#, c.slug(), c.display_name()))
        .collect();
    PAGE_TEMPLATE.replace("{options}", &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_category() {
        let page = index_page();
        for c in Category::ALL {
            assert!(page.contains(&format!(r#"<option value="{}">{}</option>"#, c.slug(), c.display_name())));
        }
        assert!(page.contains("knowledge base..."));
    }
}
