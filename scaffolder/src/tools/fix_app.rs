//! `fix-app`: troubleshooting checklist

use crate::arguments::ToolArguments;

const MISSING_PACKAGE_MARKER: &str = "is not in std";

const MISSING_PACKAGE_HINT: &str = "This error typically means Go cannot find your internal packages. Double-check your import paths to ensure they use your module name (e.g., `[appname]/internal/models`) and run `go mod tidy`.\n";

const DATABASE_EXAMPLE: &str = r#"    func main() {
        db, err := gorm.Open(sqlite.Open("gorm.db"), &gorm.Config{})
        if err != nil {
            // handle error
        }
        db.AutoMigrate(&models.Product{}, &models.Customer{}, &models.ProductCustomer{}) // Add all your models
    }
"#;

const ROUTES_EXAMPLE: &str = r#"    e.POST("/products", productController.CreateProduct)
    e.GET("/products/:id", productController.GetProductByID)
    // ... and so on for all CRUD operations and models
"#;

/// Both arguments are optional, so this tool cannot fail
pub(super) fn run(args: &ToolArguments) -> String {
    let app = args.optional_str("app_name");
    let error_message = args.optional_str("error_message");

    let mut out = String::from(
        "Here are some pointers to address common issues in your Echo web application:\n\n",
    );

    if !app.is_empty() {
        out.push_str(&format!("For application '{app}':\n"));
    }

    out.push_str("1.  **Go Module Paths**: Ensure your Go module is correctly initialized and that internal imports use the module name.\n");
    out.push_str(&format!(
        "    If your module is named `{app}`, then imports for internal packages should look like:\n"
    ));
    out.push_str("    ```go\n");
    out.push_str(&format!(
        "    import (\n        \"{app}/internal/models\"\n        \"{app}/internal/repository\"\n        \"{app}/internal/service\"\n        \"{app}/internal/controllers\"\n    )\n"
    ));
    out.push_str("    ```\n");
    out.push_str(&format!(
        "    Make sure to replace `{app}` with your actual module name.\n\n"
    ));

    out.push_str(&format!(
        "2.  **Missing Dependencies**: If you see errors like \"no required module provides package...\", run `go mod tidy` in your application's root directory (`cd {app} && go mod tidy`) to fetch missing dependencies.\n\n"
    ));

    out.push_str("3.  **Database Initialization**: Ensure your `main.go` (in `cmd/web/`) correctly initializes the GORM database connection and auto-migrates all your models. For example:\n");
    out.push_str("    ```go\n");
    out.push_str(&format!(
        "    import (\n        \"gorm.io/driver/sqlite\"\n        \"gorm.io/gorm\"\n        \"{app}/internal/models\"\n    )\n\n"
    ));
    out.push_str(DATABASE_EXAMPLE);
    out.push_str("    ```\n\n");

    out.push_str("4.  **Repository, Service, and Controller Initialization**: Verify that you are creating instances of your repositories, services, and controllers, and injecting dependencies correctly (repositories into services, services into controllers).\n\n");

    out.push_str("5.  **Route Registration**: Ensure all your controller methods have corresponding routes registered in your `main.go` (in `cmd/web/`). For example:\n");
    out.push_str("    ```go\n");
    out.push_str(ROUTES_EXAMPLE);
    out.push_str("    ```\n");

    if !error_message.is_empty() {
        out.push_str(&format!(
            "\n\nRegarding your specific error: \"{error_message}\"\n"
        ));
        if error_message.contains(MISSING_PACKAGE_MARKER) {
            out.push_str(MISSING_PACKAGE_HINT);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run_with(value: serde_json::Value) -> String {
        run(&ToolArguments::new(Some(value)))
    }

    #[test]
    fn test_checklist_without_arguments() {
        let out = run_with(json!({}));

        assert!(out.starts_with("Here are some pointers"));
        assert!(!out.contains("For application"));
        assert!(!out.contains("Regarding your specific error"));
        assert!(out.contains("5.  **Route Registration**"));
        assert!(out.ends_with("    ```\n"));
    }

    #[test]
    fn test_checklist_mentions_app() {
        let out = run_with(json!({"app_name": "shop"}));

        assert!(out.contains("For application 'shop':\n"));
        assert!(out.contains("        \"shop/internal/models\"\n"));
        assert!(out.contains("`cd shop && go mod tidy`"));
    }

    #[test]
    fn test_section_boundaries() {
        let out = run_with(json!({"app_name": "shop"}));

        assert!(out.contains(
            "    Make sure to replace `shop` with your actual module name.\n\n2.  **Missing Dependencies**"
        ));
        assert!(out.contains("(`cd shop && go mod tidy`) to fetch missing dependencies.\n\n3.  "));
        assert!(out.contains("        \"shop/internal/models\"\n    )\n\n    func main() {\n"));
        assert!(out.contains("    }\n    ```\n\n4.  "));
    }

    #[test]
    fn test_missing_package_hint() {
        let out = run_with(json!({
            "app_name": "shop",
            "error_message": "package shop/internal/models is not in std"
        }));

        assert!(out.contains(
            "\n\nRegarding your specific error: \"package shop/internal/models is not in std\"\n"
        ));
        assert!(out.ends_with(MISSING_PACKAGE_HINT));
    }

    #[test]
    fn test_other_errors_have_no_hint() {
        let out = run_with(json!({"error_message": "undefined: echo.New"}));

        assert!(out.contains("Regarding your specific error: \"undefined: echo.New\""));
        assert!(!out.contains(MISSING_PACKAGE_HINT));
    }
}
