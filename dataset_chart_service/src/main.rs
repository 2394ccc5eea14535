/*
Author      : Seunghwan Shin
Create date : 2026-10-00
Description : CSV/JSON 업로드를 받아 차트 이미지를 렌더링해주는 HTTP 서비스

History     : 2026-10-00 Seunghwan Shin       # [v.1.0.0] first create
*/

use dataset_chart_service::common::*;

use dataset_chart_service::controller::main_controller::*;
use dataset_chart_service::model::configs::{server_config::*, total_config::*};
use dataset_chart_service::repository::dataset_repository_impl::*;
use dataset_chart_service::service::{chart_service_impl::*, dataset_service_impl::*};
use dataset_chart_service::utils_modules::logger_utils::*;

#[tokio::main]
async fn main() {
    /* 전역로거 설정 및 초기 설정 */
    dotenv().ok();

    /* handle 이 drop 되면 파일 로깅이 멈추므로 main 이 끝날 때까지 보관 */
    let _logger: LoggerHandle = set_global_logger(get_logging_config_info()).unwrap_or_else(|e| {
        let err_msg: &str = "[main] An issue occurred while initializing the logger.";
        eprintln!("{} {:?}", err_msg, e);
        std::process::exit(1)
    });

    info!("Dataset chart service start!");

    let server_config: &ServerConfig = get_server_config_info();

    /* 의존 주입 */
    let dataset_repository: Arc<DatasetRepositoryImpl> = Arc::new(DatasetRepositoryImpl::new());
    let dataset_service: Arc<DatasetServiceImpl<DatasetRepositoryImpl>> = Arc::new(
        DatasetServiceImpl::new(dataset_repository, *get_dataset_config_info()),
    );
    let chart_service: Arc<ChartServiceImpl<DatasetServiceImpl<DatasetRepositoryImpl>>> =
        Arc::new(ChartServiceImpl::new(Arc::clone(&dataset_service)));

    let main_controller: MainController<
        DatasetServiceImpl<DatasetRepositoryImpl>,
        ChartServiceImpl<DatasetServiceImpl<DatasetRepositoryImpl>>,
    > = MainController::new(
        dataset_service,
        chart_service,
        *server_config.max_upload_bytes(),
    );

    let listener: TcpListener = TcpListener::bind(server_config.bind_addr())
        .await
        .unwrap_or_else(|e| {
            let err_msg: &str = "[main] An issue occurred while binding the listener.";
            error!("{} {} {:?}", err_msg, server_config.bind_addr(), e);
            panic!("{} {:?}", err_msg, e)
        });

    main_controller.serve(listener).await.unwrap_or_else(|e| {
        error!("{:?}", e);
        panic!("{:?}", e)
    });
}
