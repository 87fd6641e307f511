extern crate winres;

fn main() {
    if cfg!(target_os = "windows") {
        let mut res = winres::WindowsResource::new();
        res.set("FileDescription", "AeroList demo");
        res.set("ProductName", "AeroList");
        // Only set icon if it exists to avoid build errors
        if std::path::Path::new("resources/app.ico").exists() {
            res.set_icon("resources/app.ico");
        }
        if let Err(e) = res.compile() {
            println!("cargo:warning=failed to compile Windows resources: {}", e);
        }
    }
}
