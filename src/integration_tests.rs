#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::db::{self, DbPool};
    use crate::routes;
    use crate::state::AppState;

    async fn setup_test_app() -> (Router, DbPool) {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            ..AppConfig::default()
        };
        let pool = db::init_pool(&config.database_url)
            .await
            .expect("Failed to create pool");
        db::init_database(&pool)
            .await
            .expect("Failed to run migrations");
        (routes::create_app(AppState::new(pool.clone(), config)), pool)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.expect("router is infallible")
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("body is utf-8")
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    fn set_cookie(response: &Response) -> Option<String> {
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    fn registration(email: &str) -> String {
        format!(
            "first_name=John&last_name=Doe&email={}&phone=1234567890&password=securepassword&confirm_password=securepassword",
            email.replace('@', "%40")
        )
    }

    /// Registers and logs in, returning the `Cookie` header value for the session.
    async fn register_and_login(app: &Router, email: &str) -> String {
        let response = send(app, post_form("/register", &registration(email), None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let login = format!(
            "email={}&password=securepassword",
            email.replace('@', "%40")
        );
        let response = send(app, post_form("/login", &login, None)).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        let cookie = set_cookie(&response).expect("login sets the session cookie");
        cookie
            .split(';')
            .next()
            .expect("cookie has a name=value pair")
            .to_string()
    }

    async fn count(pool: &DbPool, sql: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(pool)
            .await
            .expect("count query failed")
    }

    async fn create_crop(app: &Router, cookie: &str, crop_type: &str) {
        let body = format!(
            "crop_type={}&area=12.5&planting_date=2024-03-01&harvest_date=&growing_state=Sprouting&needs=Irrigation",
            crop_type
        );
        let response = send(app, post_form("/crop_detail", &body, Some(cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("Crop registered successfully!"));
    }

    async fn crop_id_of(pool: &DbPool, crop_type: &str) -> i64 {
        sqlx::query_scalar("SELECT crop_id FROM crops WHERE crop_type = ?")
            .bind(crop_type)
            .fetch_one(pool)
            .await
            .expect("crop exists")
    }

    async fn create_harvest(app: &Router, pool: &DbPool, cookie: &str, crop_id: i64) -> i64 {
        let response = send(
            app,
            post_form(
                &format!("/harvest_detail/{}", crop_id),
                "harvest_date=2024-07-15&quantity=800&area=12",
                Some(cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/harvested");

        sqlx::query_scalar("SELECT MAX(harvest_id) FROM harvests WHERE crop_id = ?")
            .bind(crop_id)
            .fetch_one(pool)
            .await
            .expect("harvest exists")
    }

    #[tokio::test]
    async fn test_public_pages_render() {
        let (app, _pool) = setup_test_app().await;

        for (uri, expected) in [
            ("/", "Welcome"),
            ("/about_us", "About Us"),
            ("/contact", "Contact"),
            ("/login", "Login"),
            ("/register", "Register"),
        ] {
            let response = send(&app, get(uri, None)).await;
            assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
            assert!(body_text(response).await.contains(expected), "GET {}", uri);
        }
    }

    #[tokio::test]
    async fn test_stylesheet_is_served_without_session() {
        let (app, _pool) = setup_test_app().await;

        let response = send(&app, get("/styles/main.css", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("font-family"));
    }

    #[tokio::test]
    async fn test_register_user() {
        let (app, pool) = setup_test_app().await;

        let response = send(
            &app,
            post_form("/register", &registration("johndoe@example.com"), None),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("User created successfully!"));
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM users").await, 1);
    }

    #[tokio::test]
    async fn test_register_accepts_legacy_password_field() {
        let (app, pool) = setup_test_app().await;

        let body = "first_name=Ana&last_name=Ruiz&email=ana%40example.com&phone=&hashed_password=pw&confirm_password=pw";
        let response = send(&app, post_form("/register", body, None)).await;

        assert!(body_text(response)
            .await
            .contains("User created successfully!"));
        let phone: Option<String> = sqlx::query_scalar("SELECT phone FROM users WHERE email = ?")
            .bind("ana@example.com")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(phone.is_none());
    }

    #[tokio::test]
    async fn test_register_without_phone_field() {
        let (app, pool) = setup_test_app().await;

        let body = "first_name=Ana&last_name=Ruiz&email=ana%40example.com&password=pw&confirm_password=pw";
        let response = send(&app, post_form("/register", body, None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("User created successfully!"));
        let phone: Option<String> = sqlx::query_scalar("SELECT phone FROM users WHERE email = ?")
            .bind("ana@example.com")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(phone.is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (app, pool) = setup_test_app().await;
        let body = registration("johndoe@example.com");

        send(&app, post_form("/register", &body, None)).await;
        let response = send(&app, post_form("/register", &body, None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("The email is already registered"));
        assert_eq!(
            count(
                &pool,
                "SELECT COUNT(*) FROM users WHERE email = 'johndoe@example.com'"
            )
            .await,
            1
        );
    }

    #[tokio::test]
    async fn test_register_password_mismatch() {
        let (app, pool) = setup_test_app().await;
        let body = "first_name=John&last_name=Doe&email=john%40example.com&phone=1&password=a&confirm_password=b";

        let response = send(&app, post_form("/register", body, None)).await;

        assert!(body_text(response).await.contains("Passwords do not match."));
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM users").await, 0);
    }

    #[tokio::test]
    async fn test_login_sets_session_cookie() {
        let (app, _pool) = setup_test_app().await;
        send(
            &app,
            post_form("/register", &registration("johndoe@example.com"), None),
        )
        .await;

        let response = send(
            &app,
            post_form(
                "/login",
                "email=johndoe%40example.com&password=securepassword",
                None,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/");
        let cookie = set_cookie(&response).expect("session cookie");
        assert!(cookie.starts_with("user_id=1;"), "got {}", cookie);
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_login_invalid_credentials() {
        let (app, _pool) = setup_test_app().await;
        send(
            &app,
            post_form("/register", &registration("johndoe@example.com"), None),
        )
        .await;

        for body in [
            "email=johndoe%40example.com&password=wrongpassword",
            "email=nobody%40example.com&password=securepassword",
        ] {
            let response = send(&app, post_form("/login", body, None)).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert!(set_cookie(&response).is_none());
            assert!(body_text(response)
                .await
                .contains("Invalid email or password"));
        }
    }

    #[tokio::test]
    async fn test_logout_removes_cookie() {
        let (app, _pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;

        let response = send(&app, get("/logout", Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/");
        let cleared = set_cookie(&response).expect("logout rewrites the cookie");
        assert!(cleared.starts_with("user_id=;"));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_profile_requires_login() {
        let (app, _pool) = setup_test_app().await;

        let response = send(&app, get("/profile", None)).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_profile_logged_in() {
        let (app, _pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;

        let response = send(&app, get("/profile", Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("First Name"));
        assert!(html.contains("johndoe@example.com"));
    }

    #[tokio::test]
    async fn test_profile_for_unknown_user_redirects() {
        let (app, _pool) = setup_test_app().await;

        let response = send(&app, get("/profile", Some("user_id=99"))).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_protected_routes_redirect_without_session() {
        let (app, pool) = setup_test_app().await;

        for uri in ["/cultivation", "/crop", "/silocreation", "/distribution", "/sales_creation"] {
            let response = send(&app, get(uri, None)).await;
            assert_eq!(response.status(), StatusCode::FOUND, "GET {}", uri);
            assert_eq!(location(&response), "/login");
        }

        let response = send(
            &app,
            post_form("/pos_detail", "name=Market&address=Main+St", None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM points_of_sale").await, 0);
    }

    #[tokio::test]
    async fn test_create_crop_and_list_cultivation() {
        let (app, _pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;

        create_crop(&app, &cookie, "Wheat").await;

        let response = send(&app, get("/cultivation", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        for expected in ["Wheat", "12.5", "2024-03-01", "Sprouting", "Irrigation"] {
            assert!(html.contains(expected), "missing {}", expected);
        }
    }

    #[tokio::test]
    async fn test_delete_crop_removes_harvests_and_silos() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        create_crop(&app, &cookie, "Corn").await;
        let crop_id = crop_id_of(&pool, "Corn").await;
        let harvest_id = create_harvest(&app, &pool, &cookie, crop_id).await;

        let silo = format!("name=North&capacity=1000&content=800&harvest_id={}", harvest_id);
        let response = send(&app, post_form("/silo_detail", &silo, Some(&cookie))).await;
        assert!(body_text(response)
            .await
            .contains("Silo registered successfully!"));

        let response = send(&app, get(&format!("/crop_delete/{}", crop_id), Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/cultivation");
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM crops").await, 0);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM harvests").await, 0);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM silos").await, 0);
    }

    #[tokio::test]
    async fn test_delete_crop_keeps_other_crops_silos() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        create_crop(&app, &cookie, "Corn").await;
        create_crop(&app, &cookie, "Barley").await;
        let corn = crop_id_of(&pool, "Corn").await;
        let barley = crop_id_of(&pool, "Barley").await;
        create_harvest(&app, &pool, &cookie, corn).await;
        let barley_harvest = create_harvest(&app, &pool, &cookie, barley).await;
        let silo = format!("name=South&capacity=500&content=100&harvest_id={}", barley_harvest);
        send(&app, post_form("/silo_detail", &silo, Some(&cookie))).await;

        send(&app, get(&format!("/crop_delete/{}", corn), Some(&cookie))).await;

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM crops").await, 1);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM harvests").await, 1);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM silos").await, 1);
    }

    #[tokio::test]
    async fn test_delete_crop_with_assigned_vehicle_is_rolled_back() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        create_crop(&app, &cookie, "Beans").await;
        let crop_id = crop_id_of(&pool, "Beans").await;
        let harvest_id = create_harvest(&app, &pool, &cookie, crop_id).await;
        let silo = format!("name=West&capacity=100&content=10&harvest_id={}", harvest_id);
        send(&app, post_form("/silo_detail", &silo, Some(&cookie))).await;
        let vehicle = format!("plate=TRK-1&load_capacity=900&harvest_id={}", harvest_id);
        send(&app, post_form("/vehicle_detail", &vehicle, Some(&cookie))).await;

        let response = send(&app, get(&format!("/crop_delete/{}", crop_id), Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("Failed to delete crop. Error:"));
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM crops").await, 1);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM harvests").await, 1);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM silos").await, 1);
    }

    #[tokio::test]
    async fn test_crop_update() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        create_crop(&app, &cookie, "Oats").await;
        let crop_id = crop_id_of(&pool, "Oats").await;

        let response = send(&app, get(&format!("/crop_update/{}", crop_id), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("value=\"Oats\""));

        let body = "crop_type=Rye&area=20&planting_date=2024-04-01&harvest_date=2024-09-01&growing_state=Mature&needs=";
        let response = send(
            &app,
            post_form(&format!("/crop_update/{}", crop_id), body, Some(&cookie)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Crop updated successfully!"));
        assert!(html.contains("Rye"));
        assert!(html.contains("2024-09-01"));
        let needs: Option<String> =
            sqlx::query_scalar("SELECT treatment_needs FROM crops WHERE crop_id = ?")
                .bind(crop_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(needs.is_none());
    }

    #[tokio::test]
    async fn test_records_are_scoped_to_owner() {
        let (app, pool) = setup_test_app().await;
        let owner = register_and_login(&app, "owner@example.com").await;
        let intruder = register_and_login(&app, "intruder@example.com").await;
        create_crop(&app, &owner, "Sunflower").await;
        let crop_id = crop_id_of(&pool, "Sunflower").await;

        let html = body_text(send(&app, get("/cultivation", Some(&intruder))).await).await;
        assert!(!html.contains("Sunflower"));

        let response = send(&app, get(&format!("/crop_update/{}", crop_id), Some(&intruder))).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/cultivation");

        let response = send(&app, get(&format!("/crop_delete/{}", crop_id), Some(&intruder))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("Crop not found or unauthorized access."));

        let response = send(
            &app,
            post_form(
                &format!("/harvest_detail/{}", crop_id),
                "harvest_date=2024-07-15&quantity=1&area=1",
                Some(&intruder),
            ),
        )
        .await;
        assert!(body_text(response)
            .await
            .contains("Crop not found or unauthorized access."));

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM crops").await, 1);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM harvests").await, 0);
    }

    #[tokio::test]
    async fn test_harvest_update() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        create_crop(&app, &cookie, "Rice").await;
        let crop_id = crop_id_of(&pool, "Rice").await;
        let harvest_id = create_harvest(&app, &pool, &cookie, crop_id).await;

        let response = send(
            &app,
            post_form(
                &format!("/harvest_update/{}", harvest_id),
                "harvest_date=2024-08-01&quantity=950.5&area=11",
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/harvested");
        let quantity: f64 = sqlx::query_scalar("SELECT quantity FROM harvests WHERE harvest_id = ?")
            .bind(harvest_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(quantity, 950.5);

        let html = body_text(send(&app, get("/harvested", Some(&cookie))).await).await;
        assert!(html.contains("2024-08-01"));
    }

    #[tokio::test]
    async fn test_silo_with_missing_harvest_is_rejected() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;

        let response = send(
            &app,
            post_form(
                "/silo_detail",
                "name=Ghost&capacity=10&content=1&harvest_id=404",
                Some(&cookie),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Failed to register silo. Error:"));
        assert!(html.contains("name=\"capacity\""));
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM silos").await, 0);
    }

    #[tokio::test]
    async fn test_products_in_silo_shows_fill_level() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        create_crop(&app, &cookie, "Soy").await;
        let crop_id = crop_id_of(&pool, "Soy").await;
        let harvest_id = create_harvest(&app, &pool, &cookie, crop_id).await;
        let silo = format!("nombre=East&capacidad=200&contenido=50&id_cosecha={}", harvest_id);
        send(&app, post_form("/silo_detail", &silo, Some(&cookie))).await;

        let html = body_text(send(&app, get("/products_in_silo", Some(&cookie))).await).await;

        assert!(html.contains("East"));
        assert!(html.contains("25.0%"));
    }

    #[tokio::test]
    async fn test_distribution_flow() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        create_crop(&app, &cookie, "Potato").await;
        let crop_id = crop_id_of(&pool, "Potato").await;
        let harvest_id = create_harvest(&app, &pool, &cookie, crop_id).await;

        let response = send(
            &app,
            post_form("/pos_detail", "name=Central+Market&address=Main+St+1", Some(&cookie)),
        )
        .await;
        assert!(body_text(response)
            .await
            .contains("Point of Sale registered successfully!"));
        let pos_id: i64 = sqlx::query_scalar("SELECT pos_id FROM points_of_sale")
            .fetch_one(&pool)
            .await
            .unwrap();

        let vehicle = format!("plate=ABC-123&load_capacity=3500&harvest_id={}", harvest_id);
        let response = send(&app, post_form("/vehicle_detail", &vehicle, Some(&cookie))).await;
        assert!(body_text(response)
            .await
            .contains("Vehicle registered successfully!"));
        let vehicle_id: i64 = sqlx::query_scalar("SELECT vehicle_id FROM vehicles")
            .fetch_one(&pool)
            .await
            .unwrap();

        let assignment = format!(
            "fecha=2024-08-10&cantidad_producto=300&id_vehiculo={}&punto_venta_id={}",
            vehicle_id, pos_id
        );
        let response = send(
            &app,
            post_form("/assignment_detail", &assignment, Some(&cookie)),
        )
        .await;
        assert!(body_text(response)
            .await
            .contains("Assignment registered successfully!"));

        let html = body_text(send(&app, get("/pos_creation", Some(&cookie))).await).await;
        assert!(html.contains("Central Market"));
        let html = body_text(send(&app, get("/vehicle_creation", Some(&cookie))).await).await;
        assert!(html.contains("ABC-123"));
        let html = body_text(send(&app, get("/assignment_creation", Some(&cookie))).await).await;
        assert!(html.contains("2024-08-10"));
        assert!(html.contains("300"));

        let response = send(
            &app,
            post_form(
                &format!("/vehicle_update/{}", vehicle_id),
                &format!("plate=XYZ-999&load_capacity=4000&harvest_id={}", harvest_id),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(location(&response), "/vehicle_creation");
        let plate: String = sqlx::query_scalar("SELECT plate FROM vehicles WHERE vehicle_id = ?")
            .bind(vehicle_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(plate, "XYZ-999");
    }

    #[tokio::test]
    async fn test_assignment_with_missing_vehicle_is_rejected() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        send(
            &app,
            post_form("/pos_detail", "name=Kiosk&address=Plaza", Some(&cookie)),
        )
        .await;

        let response = send(
            &app,
            post_form(
                "/assignment_detail",
                "assignment_date=2024-08-10&product_quantity=5&vehicle_id=77&pos_id=1",
                Some(&cookie),
            ),
        )
        .await;

        assert!(body_text(response)
            .await
            .contains("Failed to register assignment. Error:"));
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM assignments").await, 0);
    }

    #[tokio::test]
    async fn test_sales_are_recorded_with_two_decimals() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        send(
            &app,
            post_form("/pos_detail", "name=Farm+Shop&address=Route+5", Some(&cookie)),
        )
        .await;

        let response = send(
            &app,
            post_form(
                "/sales_detail",
                "sale_date=2024-09-01&quantity_sold=40&price=19.999&pos_id=1",
                Some(&cookie),
            ),
        )
        .await;
        assert!(body_text(response)
            .await
            .contains("Sale registered successfully!"));

        let price: String = sqlx::query_scalar("SELECT price FROM sales")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(price, "20.00");

        let html = body_text(send(&app, get("/sales_creation", Some(&cookie))).await).await;
        assert!(html.contains("20.00"));

        let sale_id: i64 = sqlx::query_scalar("SELECT sale_id FROM sales")
            .fetch_one(&pool)
            .await
            .unwrap();
        let response = send(
            &app,
            post_form(
                &format!("/sales_update/{}", sale_id),
                "sale_date=2024-09-02&quantity_sold=45&price=18.5&pos_id=1",
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(location(&response), "/sales_creation");
        let price: String = sqlx::query_scalar("SELECT price FROM sales")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(price, "18.50");
    }

    #[tokio::test]
    async fn test_sale_price_outside_decimal_10_2_is_rejected() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        send(
            &app,
            post_form("/pos_detail", "name=Farm+Shop&address=Route+5", Some(&cookie)),
        )
        .await;
        send(
            &app,
            post_form(
                "/sales_detail",
                "sale_date=2024-09-01&quantity_sold=1&price=5&pos_id=1",
                Some(&cookie),
            ),
        )
        .await;

        let response = send(
            &app,
            post_form(
                "/sales_detail",
                "sale_date=2024-09-01&quantity_sold=1&price=123456789012345.678&pos_id=1",
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("Failed to register sale. Error:"));
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM sales").await, 1);

        let sale_id: i64 = sqlx::query_scalar("SELECT sale_id FROM sales")
            .fetch_one(&pool)
            .await
            .unwrap();
        let response = send(
            &app,
            post_form(
                &format!("/sales_update/{}", sale_id),
                "sale_date=2024-09-01&quantity_sold=1&price=100000000&pos_id=1",
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("Failed to update sale. Error:"));

        let price: String = sqlx::query_scalar("SELECT price FROM sales")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(price, "5.00");
    }

    #[tokio::test]
    async fn test_silo_update() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        create_crop(&app, &cookie, "Millet").await;
        let crop_id = crop_id_of(&pool, "Millet").await;
        let harvest_id = create_harvest(&app, &pool, &cookie, crop_id).await;
        let silo = format!("name=North&capacity=1000&content=800&harvest_id={}", harvest_id);
        send(&app, post_form("/silo_detail", &silo, Some(&cookie))).await;
        let silo_id: i64 = sqlx::query_scalar("SELECT silo_id FROM silos")
            .fetch_one(&pool)
            .await
            .unwrap();

        let moved = format!("name=North+B&capacity=1200&content=900&harvest_id={}", harvest_id);
        let response = send(
            &app,
            post_form(&format!("/silo_update/{}", silo_id), &moved, Some(&cookie)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/silocreation");

        let response = send(
            &app,
            post_form(
                &format!("/silo_update/{}", silo_id),
                "name=Broken&capacity=1&content=1&harvest_id=404",
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Failed to update silo. Error:"));
        assert!(html.contains("value=\"North B\""));

        let (name, capacity): (String, f64) =
            sqlx::query_as("SELECT name, capacity FROM silos WHERE silo_id = ?")
                .bind(silo_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(name, "North B");
        assert_eq!(capacity, 1200.0);
    }

    #[tokio::test]
    async fn test_point_of_sale_and_assignment_updates() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;
        create_crop(&app, &cookie, "Lentil").await;
        let crop_id = crop_id_of(&pool, "Lentil").await;
        let harvest_id = create_harvest(&app, &pool, &cookie, crop_id).await;
        send(
            &app,
            post_form("/pos_detail", "name=Stall&address=Old+Road", Some(&cookie)),
        )
        .await;
        let vehicle = format!("plate=VAN-7&load_capacity=800&harvest_id={}", harvest_id);
        send(&app, post_form("/vehicle_detail", &vehicle, Some(&cookie))).await;
        send(
            &app,
            post_form(
                "/assignment_detail",
                "assignment_date=2024-08-10&product_quantity=50&vehicle_id=1&pos_id=1",
                Some(&cookie),
            ),
        )
        .await;

        let response = send(
            &app,
            post_form("/pos_update/1", "name=Big+Stall&address=New+Road+2", Some(&cookie)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/pos_creation");
        let html = body_text(send(&app, get("/pos_creation", Some(&cookie))).await).await;
        assert!(html.contains("Big Stall"));
        assert!(html.contains("New Road 2"));

        let response = send(
            &app,
            post_form(
                "/assignment_update/1",
                "assignment_date=2024-08-12&product_quantity=75&vehicle_id=1&pos_id=1",
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/assignment_creation");
        let quantity: f64 =
            sqlx::query_scalar("SELECT product_quantity FROM assignments WHERE assignment_id = 1")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(quantity, 75.0);

        let response = send(
            &app,
            post_form(
                "/assignment_update/1",
                "assignment_date=2024-08-12&product_quantity=75&vehicle_id=99&pos_id=1",
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("Failed to update assignment. Error:"));
    }

    #[tokio::test]
    async fn test_distribution_and_sales_are_scoped_to_owner() {
        let (app, pool) = setup_test_app().await;
        let owner = register_and_login(&app, "owner@example.com").await;
        let intruder = register_and_login(&app, "intruder@example.com").await;

        create_crop(&app, &owner, "Quinoa").await;
        let crop_id = crop_id_of(&pool, "Quinoa").await;
        let harvest_id = create_harvest(&app, &pool, &owner, crop_id).await;
        let silo = format!("name=Owner+Bin&capacity=100&content=40&harvest_id={}", harvest_id);
        send(&app, post_form("/silo_detail", &silo, Some(&owner))).await;
        send(
            &app,
            post_form("/pos_detail", "name=Owner+Market&address=Main+St", Some(&owner)),
        )
        .await;
        let vehicle = format!("plate=OWN-001&load_capacity=900&harvest_id={}", harvest_id);
        send(&app, post_form("/vehicle_detail", &vehicle, Some(&owner))).await;
        send(
            &app,
            post_form(
                "/assignment_detail",
                "assignment_date=2024-08-10&product_quantity=300&vehicle_id=1&pos_id=1",
                Some(&owner),
            ),
        )
        .await;
        send(
            &app,
            post_form(
                "/sales_detail",
                "sale_date=2024-09-01&quantity_sold=40&price=77.7&pos_id=1",
                Some(&owner),
            ),
        )
        .await;

        for (uri, owned) in [
            ("/harvested", "2024-07-15"),
            ("/silocreation", "Owner Bin"),
            ("/products_in_silo", "Owner Bin"),
            ("/pos_creation", "Owner Market"),
            ("/vehicle_creation", "OWN-001"),
            ("/assignment_creation", "2024-08-10"),
            ("/sales_creation", "77.70"),
        ] {
            let html = body_text(send(&app, get(uri, Some(&owner))).await).await;
            assert!(html.contains(owned), "owner GET {}", uri);
            let html = body_text(send(&app, get(uri, Some(&intruder))).await).await;
            assert!(!html.contains(owned), "intruder GET {}", uri);
        }

        let hijack = format!("harvest_id={}", harvest_id);
        let harvest_update = format!("/harvest_update/{}", harvest_id);
        for (uri, body, listing) in [
            (
                "/silo_update/1",
                format!("name=Hijacked&capacity=1&content=1&{}", hijack),
                "/silocreation",
            ),
            (
                "/pos_update/1",
                "name=Hijacked&address=Elsewhere".to_string(),
                "/pos_creation",
            ),
            (
                "/vehicle_update/1",
                format!("plate=Hijacked&load_capacity=1&{}", hijack),
                "/vehicle_creation",
            ),
            (
                "/assignment_update/1",
                "assignment_date=2030-01-01&product_quantity=1&vehicle_id=1&pos_id=1".to_string(),
                "/assignment_creation",
            ),
            (
                "/sales_update/1",
                "sale_date=2030-01-01&quantity_sold=1&price=1&pos_id=1".to_string(),
                "/sales_creation",
            ),
            (
                harvest_update.as_str(),
                "harvest_date=2030-01-01&quantity=1&area=1".to_string(),
                "/harvested",
            ),
        ] {
            let response = send(&app, post_form(uri, &body, Some(&intruder))).await;
            assert_eq!(response.status(), StatusCode::FOUND, "intruder POST {}", uri);
            assert_eq!(location(&response), listing, "intruder POST {}", uri);
        }

        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM silos WHERE name = 'Owner Bin'").await,
            1
        );
        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM points_of_sale WHERE name = 'Owner Market'").await,
            1
        );
        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM vehicles WHERE plate = 'OWN-001'").await,
            1
        );
        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM assignments WHERE assignment_date = '2024-08-10'").await,
            1
        );
        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM sales WHERE price = '77.70'").await,
            1
        );
        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM harvests WHERE harvest_date = '2024-07-15'").await,
            1
        );
    }

    #[tokio::test]
    async fn test_overlong_names_are_rejected() {
        let (app, pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;

        let body = format!("name={}&address=Main+St", "a".repeat(51));
        let response = send(&app, post_form("/pos_detail", &body, Some(&cookie))).await;
        assert!(body_text(response)
            .await
            .contains("Failed to register Point of Sale. Error:"));

        let body = format!("name=Kiosk&address={}", "b".repeat(101));
        let response = send(&app, post_form("/pos_detail", &body, Some(&cookie))).await;
        assert!(body_text(response)
            .await
            .contains("Failed to register Point of Sale. Error:"));

        let body = format!(
            "crop_type={}&area=1&planting_date=2024-03-01&growing_state=Seed",
            "c".repeat(51)
        );
        let response = send(&app, post_form("/crop_detail", &body, Some(&cookie))).await;
        assert!(body_text(response)
            .await
            .contains("Failed to register crop. Error:"));

        let body = format!("name={}&address={}", "a".repeat(50), "b".repeat(100));
        let response = send(&app, post_form("/pos_detail", &body, Some(&cookie))).await;
        assert!(body_text(response)
            .await
            .contains("Point of Sale registered successfully!"));

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM points_of_sale").await, 1);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM crops").await, 0);
    }

    #[tokio::test]
    async fn test_update_of_missing_record_redirects_to_listing() {
        let (app, _pool) = setup_test_app().await;
        let cookie = register_and_login(&app, "johndoe@example.com").await;

        for (uri, listing) in [
            ("/silo_update/5", "/silocreation"),
            ("/pos_update/5", "/pos_creation"),
            ("/sales_update/5", "/sales_creation"),
            ("/vehicle_update/5", "/vehicle_creation"),
            ("/assignment_update/5", "/assignment_creation"),
            ("/harvest_update/5", "/harvested"),
            ("/harvest/5", "/cultivation"),
        ] {
            let response = send(&app, get(uri, Some(&cookie))).await;
            assert_eq!(response.status(), StatusCode::FOUND, "GET {}", uri);
            assert_eq!(location(&response), listing, "GET {}", uri);
        }
    }
}
