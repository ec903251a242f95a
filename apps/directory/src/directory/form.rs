/// Upload page served on `GET /` and when a POST carried no file.
pub const UPLOAD_FORM_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Family Directory Generator</title>
</head>
<body>
  <h1>Family Directory Generator</h1>
  <p>Upload a CSV file, or a ZIP archive containing one, to download the directory as a PDF.</p>
  <form method="post" action="/" enctype="multipart/form-data">
    <input type="file" name="csv_file" accept=".csv,.zip" required>
    <button type="submit">Generate PDF</button>
  </form>
</body>
</html>
"#;
